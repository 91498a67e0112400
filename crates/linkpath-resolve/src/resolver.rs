use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::Value;
use tracing::{debug, warn};

use linkpath_client::ObjectClient;
use linkpath_schema::SchemaRegistry;
use linkpath_types::{validate_id, FieldPath, FieldSchema, Memo, ObjectRecord, Properties, Schema};

use crate::config::ResolverConfig;
use crate::error::{ResolveError, ResolveResult};

/// One fan-out branch: the ordered leaf values below one element or link.
type Branch<'a> = BoxFuture<'a, ResolveResult<Vec<Value>>>;

/// Objects fetched on behalf of one or more resolve calls.
///
/// [`PathResolver::resolve`] uses a fresh session per call. Pass the same
/// session to [`PathResolver::resolve_in`] to share fetched objects across
/// calls.
#[derive(Debug, Default)]
pub struct ResolveSession {
    objects: Memo<Arc<ObjectRecord>>,
}

impl ResolveSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted identifiers fetched so far.
    pub fn fetched_ids(&self) -> Vec<String> {
        self.objects.keys()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Position in the segment list. `pos` indexes the segment being consumed.
#[derive(Clone, Copy)]
struct Cursor<'a> {
    segments: &'a [String],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn segment(&self) -> &'a str {
        &self.segments[self.pos]
    }

    fn is_last(&self) -> bool {
        self.pos + 1 == self.segments.len()
    }

    fn next(self) -> Self {
        Self {
            pos: self.pos + 1,
            ..self
        }
    }

    /// Dotted route up to and including the current segment.
    fn route(&self) -> String {
        self.segments[..=self.pos].join(".")
    }
}

/// The object a value belongs to and the type whose schema is in scope.
#[derive(Clone, Copy)]
struct Frame<'a> {
    object_id: &'a str,
    type_name: &'a str,
}

/// Resolves dotted paths across linked objects.
pub struct PathResolver {
    registry: Arc<SchemaRegistry>,
    objects: ObjectClient,
    config: ResolverConfig,
}

impl PathResolver {
    pub fn new(registry: Arc<SchemaRegistry>, objects: ObjectClient) -> Self {
        Self {
            registry,
            objects,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// Resolve `path` starting from the object `start_id`.
    ///
    /// Both inputs are validated before any fetch.
    pub async fn resolve(&self, start_id: &str, path: &str) -> ResolveResult<Vec<Value>> {
        let start_id = validate_id(start_id)?;
        let path = FieldPath::parse(path)?;
        self.resolve_in(&ResolveSession::new(), start_id, &path).await
    }

    /// Resolve an already parsed path, reusing objects held by `session`.
    pub async fn resolve_in(
        &self,
        session: &ResolveSession,
        start_id: &str,
        path: &FieldPath,
    ) -> ResolveResult<Vec<Value>> {
        let start_id = validate_id(start_id)?;
        let record = self.object(session, start_id).await?;
        let schema = self.schema(record.type_name()).await?;

        let frame = Frame {
            object_id: record.id(),
            type_name: schema.type_name(),
        };
        let cursor = Cursor {
            segments: path.segments(),
            pos: 0,
        };
        let values = self
            .walk_fields(session, frame, record.document(), schema.fields(), cursor)
            .await?;
        debug!(start_id, %path, results = values.len(), "resolved path");
        Ok(values)
    }

    fn walk_fields<'a>(
        &'a self,
        session: &'a ResolveSession,
        frame: Frame<'a>,
        value: &'a Value,
        fields: &'a Properties,
        cursor: Cursor<'a>,
    ) -> Branch<'a> {
        self.lookup(session, frame, value, fields, cursor).boxed()
    }

    fn advance<'a>(
        &'a self,
        session: &'a ResolveSession,
        frame: Frame<'a>,
        value: &'a Value,
        shape: &'a FieldSchema,
        cursor: Cursor<'a>,
    ) -> Branch<'a> {
        self.descend(session, frame, value, shape, cursor).boxed()
    }

    fn follow<'a>(
        &'a self,
        session: &'a ResolveSession,
        id: &'a str,
        target: &'a str,
        cursor: Cursor<'a>,
    ) -> Branch<'a> {
        self.enter(session, id, target, cursor).boxed()
    }

    /// Consume the segment at `cursor` against an object's field mapping.
    async fn lookup(
        &self,
        session: &ResolveSession,
        frame: Frame<'_>,
        value: &Value,
        fields: &Properties,
        cursor: Cursor<'_>,
    ) -> ResolveResult<Vec<Value>> {
        let segment = cursor.segment();
        let field = fields
            .get(segment)
            .ok_or_else(|| ResolveError::UnknownField {
                type_name: frame.type_name.to_string(),
                field: cursor.route(),
            })?;
        let raw = value
            .get(segment)
            .ok_or_else(|| ResolveError::MissingField {
                object: frame.object_id.to_string(),
                field: cursor.route(),
            })?;

        if cursor.is_last() {
            return terminal(raw, field, cursor);
        }
        self.advance(session, frame, raw, field, cursor).await
    }

    /// Continue past the value produced by the segment at `cursor`.
    async fn descend(
        &self,
        session: &ResolveSession,
        frame: Frame<'_>,
        value: &Value,
        shape: &FieldSchema,
        cursor: Cursor<'_>,
    ) -> ResolveResult<Vec<Value>> {
        match shape {
            FieldSchema::Scalar => Err(ResolveError::PathTooLong {
                field: cursor.route(),
            }),
            FieldSchema::Object { properties } => {
                if !value.is_object() {
                    return Err(shape_mismatch(cursor, "an object"));
                }
                self.walk_fields(session, frame, value, properties, cursor.next())
                    .await
            }
            FieldSchema::Array { items } => {
                let elements = value
                    .as_array()
                    .ok_or_else(|| shape_mismatch(cursor, "an array"))?;
                check_items(frame.type_name, items, cursor)?;
                debug!(field = %cursor.route(), elements = elements.len(), "array fan-out");
                let branches: Vec<Branch<'_>> = elements
                    .iter()
                    .map(|element| self.advance(session, frame, element, items, cursor))
                    .collect();
                self.join(branches).await
            }
            FieldSchema::Link { target } => {
                let ids = link_ids(value)
                    .ok_or_else(|| shape_mismatch(cursor, "an identifier or list of identifiers"))?;
                debug!(field = %cursor.route(), target = %target, links = ids.len(), "link fan-out");
                let next = cursor.next();
                let branches: Vec<Branch<'_>> = ids
                    .into_iter()
                    .map(|id| self.follow(session, id, target, next))
                    .collect();
                self.join(branches).await
            }
        }
    }

    /// Fetch a linked object and continue at `cursor` against its schema.
    async fn enter(
        &self,
        session: &ResolveSession,
        id: &str,
        target: &str,
        cursor: Cursor<'_>,
    ) -> ResolveResult<Vec<Value>> {
        let (record, schema) = futures::try_join!(self.object(session, id), self.schema(target))?;
        if record.type_name() != target {
            warn!(
                id,
                declared = target,
                found = record.type_name(),
                "linked object type differs from link target; using link target schema"
            );
        }
        let frame = Frame {
            object_id: record.id(),
            type_name: schema.type_name(),
        };
        self.walk_fields(session, frame, record.document(), schema.fields(), cursor)
            .await
    }

    /// Run branches with bounded concurrency, concatenated in branch order.
    ///
    /// The first error ends the join; unfinished branches are dropped.
    async fn join(&self, branches: Vec<Branch<'_>>) -> ResolveResult<Vec<Value>> {
        let nested: Vec<Vec<Value>> = stream::iter(branches)
            .buffered(self.config.fan_out_limit())
            .try_collect()
            .await?;
        Ok(nested.into_iter().flatten().collect())
    }

    async fn object(&self, session: &ResolveSession, id: &str) -> ResolveResult<Arc<ObjectRecord>> {
        let record = session
            .objects
            .get_or_try_init(id, || self.objects.get(id))
            .await?;
        Ok(record)
    }

    async fn schema(&self, type_name: &str) -> ResolveResult<Arc<Schema>> {
        Ok(self.registry.get(type_name).await?)
    }
}

impl std::fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathResolver")
            .field("registry", &self.registry)
            .field("objects", &self.objects)
            .field("config", &self.config)
            .finish()
    }
}

/// Leaf values of the final segment. Links are returned as stored.
fn terminal(raw: &Value, field: &FieldSchema, cursor: Cursor<'_>) -> ResolveResult<Vec<Value>> {
    match field {
        FieldSchema::Array { .. } => raw
            .as_array()
            .cloned()
            .ok_or_else(|| shape_mismatch(cursor, "an array")),
        _ => Ok(vec![raw.clone()]),
    }
}

/// Check the rest of the path against an array's `items` shape without
/// touching data, up to the first link. An empty array then fails the same
/// way a populated one would.
fn check_items(type_name: &str, items: &FieldSchema, cursor: Cursor<'_>) -> ResolveResult<()> {
    match items {
        FieldSchema::Scalar => Err(ResolveError::PathTooLong {
            field: cursor.route(),
        }),
        FieldSchema::Array { items } => check_items(type_name, items, cursor),
        FieldSchema::Object { properties } => {
            let next = cursor.next();
            let field = properties
                .get(next.segment())
                .ok_or_else(|| ResolveError::UnknownField {
                    type_name: type_name.to_string(),
                    field: next.route(),
                })?;
            if next.is_last() {
                return Ok(());
            }
            check_items(type_name, field, next)
        }
        FieldSchema::Link { .. } => Ok(()),
    }
}

/// Identifiers held by a link value: one string or an array of strings.
fn link_ids(value: &Value) -> Option<Vec<&str>> {
    match value {
        Value::String(id) => Some(vec![id.as_str()]),
        Value::Array(items) => items.iter().map(Value::as_str).collect(),
        _ => None,
    }
}

fn shape_mismatch(cursor: Cursor<'_>, expected: &'static str) -> ResolveError {
    ResolveError::ShapeMismatch {
        field: cursor.route(),
        expected,
    }
}

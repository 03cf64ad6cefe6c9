//! Session harness with a manual clock.

use std::sync::{Arc, Once};
use std::time::Duration;

use tern_catalog::TableDef;
use tern_codec::Term;
use tern_core::{EngineConfig, Generation, RowUpsert, WriteTime};
use tern_liveness::ManualClock;
use tern_mutation::{DeleteRequest, ErrorKind, InsertRequest};
use tern_session::{Row, Session, SessionError, SessionResult};
use tracing_subscriber::EnvFilter;

/// 2017-01-01T00:00:00Z, in milliseconds.
pub const START_MILLIS: i64 = 1_483_228_800_000;

/// Route `tracing` output to the test writer, filtered by `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A session plus the clock it reads.
#[derive(Debug, Clone)]
pub struct Harness {
    session: Arc<Session>,
    clock: Arc<ManualClock>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Default configuration, clock at `START_MILLIS`.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        init_tracing();
        let clock = Arc::new(ManualClock::new(WriteTime::from_millis(START_MILLIS)));
        let session = Session::in_memory(config, clock.clone()).expect("valid configuration");
        Self {
            session: Arc::new(session),
            clock,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn now(&self) -> WriteTime {
        self.session.now()
    }

    pub fn advance_millis(&self, millis: u64) {
        self.clock.advance(Duration::from_millis(millis));
    }

    pub fn advance_secs(&self, secs: u64) {
        self.clock.advance(Duration::from_secs(secs));
    }

    // ==================== DDL ====================

    pub fn create(&self, def: TableDef) -> Generation {
        self.session.create_table(def).expect("create table")
    }

    pub fn drop_table(&self, name: &str) {
        self.session.drop_table(name).expect("drop table")
    }

    // ==================== Mutations ====================

    pub fn insert(&self, request: &InsertRequest) -> SessionResult<RowUpsert> {
        self.session.insert(request)
    }

    /// Insert that must succeed.
    pub fn insert_ok(&self, request: &InsertRequest) -> RowUpsert {
        match self.session.insert(request) {
            Ok(upsert) => upsert,
            Err(e) => panic!("insert into {} failed: {}", request.table, e),
        }
    }

    /// Insert that must fail; returns the error.
    pub fn insert_err(&self, request: &InsertRequest) -> SessionError {
        match self.session.insert(request) {
            Ok(upsert) => panic!("insert into {} succeeded: {:?}", request.table, upsert),
            Err(e) => e,
        }
    }

    /// Insert that must fail with an error of `kind`.
    pub fn assert_rejected(&self, request: &InsertRequest, kind: ErrorKind) {
        let err = self.insert_err(request);
        assert_eq!(err.kind(), kind, "unexpected error: {}", err);
    }

    pub fn delete(&self, request: &DeleteRequest) -> SessionResult<()> {
        self.session.delete(request).map(|_| ())
    }

    // ==================== Reads ====================

    pub fn row(&self, table: &str, key: Vec<(String, Term)>) -> Option<Row> {
        self.session.select_row(table, key).expect("select row")
    }

    pub fn partition(&self, table: &str, key: Vec<(String, Term)>) -> Vec<Row> {
        self.session
            .select_partition(table, key)
            .expect("select partition")
    }

    pub fn all(&self, table: &str) -> Vec<Row> {
        self.session.select_all(table).expect("select all")
    }

    /// Every visible row rendered as `Row[..]`.
    pub fn rendered(&self, table: &str) -> Vec<String> {
        self.all(table).iter().map(|r| r.to_string()).collect()
    }
}

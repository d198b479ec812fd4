//! Emission Interface: the narrow boundary between this crate and
//! whatever front-end renders a sample (text table, JSON, binary
//! archive, ...). The sink decides *how* to present a value; it never
//! decides *which* values exist or what they mean — this module only
//! ever hands it already-derived numbers tagged with an entity key.

use crate::error::FatalError;

/// A single derived value plus the label identifying what it is. Kept
/// untyped (`f64`) and stringly-labeled rather than modeled per entity
/// kind, since the sink's only job is to lay values out: it makes no
/// formatting decisions.
pub struct Field<'a> {
    pub name: &'a str,
    pub value: f64,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, value: f64) -> Self {
        Self { name, value }
    }
}

/// Sink for one sampling run's output. Implementations might print a
/// table, serialize JSON, or append to an on-disk archive; none of that
/// is this crate's concern.
pub trait EmissionSink {
    /// Called once per tick, before any `record` calls for that tick.
    fn begin_sample(&mut self, interval_cs: u64) -> Result<(), FatalError>;

    /// Called once per entity per tick, with that entity's derived
    /// fields in a fixed, caller-chosen order.
    fn record(&mut self, entity_kind: &str, entity_key: &str, fields: &[Field<'_>]) -> Result<(), FatalError>;

    /// Called once per tick, after every `record` call for that tick.
    fn end_sample(&mut self) -> Result<(), FatalError>;

    /// Called once, at the end of a run, before the final average pass.
    fn begin_average(&mut self, total_run_cs: u64) -> Result<(), FatalError>;

    /// Called once per entity in the final average pass.
    fn record_average(
        &mut self,
        entity_kind: &str,
        entity_key: &str,
        fields: &[Field<'_>],
    ) -> Result<(), FatalError>;

    fn end_average(&mut self) -> Result<(), FatalError>;
}

/// Sink that discards everything; useful for benchmarking the
/// collection/derivation pipeline in isolation, and as a default in
/// tests that only care about scheduler behavior.
#[derive(Debug, Default)]
pub struct NullSink;

impl EmissionSink for NullSink {
    fn begin_sample(&mut self, _interval_cs: u64) -> Result<(), FatalError> {
        Ok(())
    }

    fn record(&mut self, _entity_kind: &str, _entity_key: &str, _fields: &[Field<'_>]) -> Result<(), FatalError> {
        Ok(())
    }

    fn end_sample(&mut self) -> Result<(), FatalError> {
        Ok(())
    }

    fn begin_average(&mut self, _total_run_cs: u64) -> Result<(), FatalError> {
        Ok(())
    }

    fn record_average(&mut self, _entity_kind: &str, _entity_key: &str, _fields: &[Field<'_>]) -> Result<(), FatalError> {
        Ok(())
    }

    fn end_average(&mut self) -> Result<(), FatalError> {
        Ok(())
    }
}

/// One recorded sample or average row, captured verbatim — used by
/// tests and by the demo binary's plain-text renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRow {
    pub entity_kind: String,
    pub entity_key: String,
    pub fields: Vec<(String, f64)>,
}

/// Sink that captures every call into memory, for assertions in tests
/// and for the demo binary.
#[derive(Debug, Default)]
pub struct VecSink {
    pub samples: Vec<Vec<RecordedRow>>,
    pub averages: Vec<RecordedRow>,
    current_sample: Vec<RecordedRow>,
}

impl EmissionSink for VecSink {
    fn begin_sample(&mut self, _interval_cs: u64) -> Result<(), FatalError> {
        self.current_sample.clear();
        Ok(())
    }

    fn record(&mut self, entity_kind: &str, entity_key: &str, fields: &[Field<'_>]) -> Result<(), FatalError> {
        self.current_sample.push(RecordedRow {
            entity_kind: entity_kind.to_string(),
            entity_key: entity_key.to_string(),
            fields: fields.iter().map(|f| (f.name.to_string(), f.value)).collect(),
        });
        Ok(())
    }

    fn end_sample(&mut self) -> Result<(), FatalError> {
        self.samples.push(std::mem::take(&mut self.current_sample));
        Ok(())
    }

    fn begin_average(&mut self, _total_run_cs: u64) -> Result<(), FatalError> {
        Ok(())
    }

    fn record_average(&mut self, entity_kind: &str, entity_key: &str, fields: &[Field<'_>]) -> Result<(), FatalError> {
        self.averages.push(RecordedRow {
            entity_kind: entity_kind.to_string(),
            entity_key: entity_key.to_string(),
            fields: fields.iter().map(|f| (f.name.to_string(), f.value)).collect(),
        });
        Ok(())
    }

    fn end_average(&mut self) -> Result<(), FatalError> {
        Ok(())
    }
}

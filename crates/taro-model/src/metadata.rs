//! `Metadata` table — `spec.md` §3/§6.

use chrono_tz::Tz;
use taro_time::EngineTimeUnit;

use crate::error::{ModelContractError, ModelResult};
use crate::reader::TableReader;

/// Model-wide metadata, parsed and validated once at load time.
#[derive(Clone, Debug)]
pub struct Metadata {
    pub schema_version: u64,
    pub model_version: String,
    pub time_unit: EngineTimeUnit,
    pub tick_duration_ns: u64,
    pub profile_timezone_name: String,
    pub profile_timezone: Tz,
}

pub(crate) fn parse(r: &mut TableReader<'_>) -> ModelResult<Metadata> {
    let schema_version = r.read_u64()?;
    if schema_version != 1 {
        return Err(ModelContractError::UnsupportedSchemaVersion(schema_version));
    }
    let model_version = r.read_string()?;
    let time_unit_tag = r.read_u8()?;
    let time_unit = EngineTimeUnit::from_wire_tag(time_unit_tag)?;
    let tick_duration_ns = r.read_u64()?;
    time_unit.validate_tick_duration_ns(tick_duration_ns)?;
    let profile_timezone_name = r.read_string()?;
    let profile_timezone = taro_time::calendar::parse_timezone(&profile_timezone_name)?;

    Ok(Metadata {
        schema_version,
        model_version,
        time_unit,
        tick_duration_ns,
        profile_timezone_name,
        profile_timezone,
    })
}

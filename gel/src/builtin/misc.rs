use crate::args::Args;
use crate::error::{Error, Result};
use crate::scope::Scope;
use crate::value::{date_from_millis, Value};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use std::rc::Rc;

const MAX_MONTHS: f64 = 12.0 * 1_000_000.0;

fn invalid_date(what: &Value) -> Error {
    Error::Type(format!("invalid date: {}", what))
}

fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(d) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn to_date(value: &Value) -> Result<NaiveDateTime> {
    let date = match value {
        Value::Date(d) => Some(*d),
        Value::Number(n) => date_from_millis(*n),
        Value::String(s) => parse_date(s),
        _ => None,
    };
    date.ok_or_else(|| invalid_date(value))
}

// year, zero based month, day, hours, minutes, seconds, millis; overflowing
// fields carry into the next one
fn from_parts(parts: &[Value]) -> Result<NaiveDateTime> {
    let mut fields = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
    for (field, part) in fields.iter_mut().zip(parts) {
        *field = part.to_number().trunc();
    }
    let invalid = || invalid_date(&Value::from(parts.to_vec()));
    if fields.iter().any(|f| !f.is_finite()) {
        return Err(invalid());
    }
    // keeps the integer math in range, chrono rejects such years anyway
    let months = fields[0] * 12.0 + fields[1];
    if months.abs() > MAX_MONTHS {
        return Err(invalid());
    }
    let months = months as i64;
    let first = i32::try_from(months.div_euclid(12)).ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, months.rem_euclid(12) as u32 + 1, 1))
        .and_then(|d| d.and_hms_opt(0, 0, 0));
    let minutes = ((fields[2] - 1.0) * 24.0 + fields[3]) * 60.0 + fields[4];
    let millis = minutes * 60_000.0 + fields[5] * 1000.0 + fields[6];
    first.and_then(|d| d.checked_add_signed(TimeDelta::try_milliseconds(millis as i64)?))
        .ok_or_else(invalid)
}

/// `(date)` is now in UTC, `(date x)` converts millis or a date string, more
/// arguments are date parts starting with the year.
pub fn date(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    match args.len() {
        0 => Ok(Value::Date(Utc::now().naive_utc())),
        1 => to_date(&args.next()?).map(Value::Date),
        _ => from_parts(&args.all()?).map(Value::Date),
    }
}

pub fn add_days(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let base = match args.next()? {
        Value::Date(d) => d,
        other => return Err(Error::Type(format!("addDays of {}", other.type_name()))),
    };
    let days = args.next()?;
    let n = days.to_number();
    if !n.is_finite() {
        return Err(invalid_date(&days));
    }
    TimeDelta::try_days(n.trunc() as i64)
        .and_then(|delta| base.checked_add_signed(delta))
        .map(Value::Date)
        .ok_or_else(|| invalid_date(&days))
}

pub fn to_json(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    Ok(args.next()?.to_json()
        .map_or(Value::Undefined, |json| Value::String(json.to_string())))
}

pub fn from_json(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    Value::parse_json(&args.next()?.to_string())
}

///////////////////////////////////////////////////////////////////////////////

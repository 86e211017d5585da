//! Timestamp stdlib callables (spec §4.2, §6.5).
//!
//! Timestamps are opaque instants with UTC accessors; `tz` values are
//! signed minute offsets supplied by the caller, never stored on the
//! timestamp itself.

use crate::date::{self};
use axon_eval::{NativeFn, Value};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

fn as_ts(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::Timestamp(t) => Some(*t),
        Value::String(s) => DateTime::parse_from_rfc3339(s).ok().map(|d| d.with_timezone(&Utc)),
        _ => None,
    }
}

fn local_naive(ts: DateTime<Utc>, tz_minutes: i64) -> NaiveDateTime {
    ts.naive_utc() + Duration::minutes(tz_minutes)
}

fn to_utc(local: NaiveDateTime, tz_minutes: i64) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(local - Duration::minutes(tz_minutes), Utc)
}

pub fn ts_now() -> NativeFn {
    NativeFn::new(0, |_args, _ctx| Ok(Value::Timestamp(Utc::now())))
}

pub fn tz_utc() -> NativeFn {
    NativeFn::new(0, |_args, _ctx| Ok(Value::Number(0.0)))
}

pub fn tz_local() -> NativeFn {
    NativeFn::new(0, |_args, _ctx| {
        let offset = *chrono::Local::now().offset();
        Ok(Value::Number((offset.local_minus_utc() / 60) as f64))
    })
}

pub fn ts_from_unix() -> NativeFn {
    NativeFn::new(1, |args, _ctx| {
        Ok(match args[0].as_number().and_then(|n| DateTime::from_timestamp(n as i64, 0)) {
            Some(ts) => Value::Timestamp(ts),
            None => Value::Null,
        })
    })
}

pub fn ts_to_unix() -> NativeFn {
    NativeFn::new(1, |args, _ctx| {
        Ok(as_ts(&args[0]).map(|t| Value::Number(t.timestamp() as f64)).unwrap_or(Value::Null))
    })
}

/// `ts_from_date(date, tz)`: midnight of `date` expressed in offset `tz`.
pub fn ts_from_date() -> NativeFn {
    NativeFn::new(2, |args, _ctx| {
        let date = match &args[0] {
            Value::Date(d) => Some(*d),
            Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
            _ => None,
        };
        let (Some(date), Some(tz)) = (date, args[1].as_number()) else {
            return Ok(Value::Null);
        };
        let local = date.and_time(NaiveTime::MIN);
        Ok(Value::Timestamp(to_utc(local, tz as i64)))
    })
}

pub fn ts_to_date() -> NativeFn {
    NativeFn::new(2, |args, _ctx| {
        let (Some(ts), Some(tz)) = (as_ts(&args[0]), args[1].as_number()) else {
            return Ok(Value::Null);
        };
        Ok(Value::Date(local_naive(ts, tz as i64).date()))
    })
}

pub fn ts_parse() -> NativeFn {
    NativeFn::new(1, |args, _ctx| {
        Ok(match args[0].as_str().and_then(|s| DateTime::parse_from_rfc3339(s).ok()) {
            Some(ts) => Value::Timestamp(ts.with_timezone(&Utc)),
            None => Value::Null,
        })
    })
}

pub fn ts_to_string() -> NativeFn {
    NativeFn::new(1, |args, _ctx| {
        Ok(as_ts(&args[0]).map(|t| Value::string(t.to_rfc3339())).unwrap_or(Value::Null))
    })
}

pub fn ts_fmt() -> NativeFn {
    NativeFn::new(2, |args, _ctx| {
        let (Some(ts), Some(tz)) = (as_ts(&args[0]), args[1].as_number()) else {
            return Ok(Value::Null);
        };
        let local = local_naive(ts, tz as i64);
        let month = date::month_name_eo(local.month0() as usize);
        Ok(Value::string(format!(
            "{} de {} {} je {:02}:{:02}:{:02}",
            local.day(),
            month,
            local.year(),
            local.hour(),
            local.minute(),
            local.second()
        )))
    })
}

/// `ts_add(ts, n, unit)`, unit in `seconds|minutes|hours|days|months|years`.
pub fn ts_add() -> NativeFn {
    NativeFn::new(3, |args, _ctx| {
        let (Some(ts), Some(n), Some(unit)) = (as_ts(&args[0]), args[1].as_number(), args[2].as_str())
        else {
            return Ok(Value::Null);
        };
        let result = match unit {
            "seconds" => ts + Duration::seconds(n as i64),
            "minutes" => ts + Duration::minutes(n as i64),
            "hours" => ts + Duration::hours(n as i64),
            "days" => ts + Duration::days(n as i64),
            "months" | "years" => {
                let months = if unit == "years" { n as i64 * 12 } else { n as i64 };
                let shifted_date = date::add_months(ts.date_naive(), months);
                DateTime::from_naive_utc_and_offset(shifted_date.and_time(ts.time()), Utc)
            }
            _ => return Ok(Value::Null),
        };
        Ok(Value::Timestamp(result))
    })
}

/// `ts_sub(unit, a, b)`: `a - b` expressed in `unit`.
pub fn ts_sub() -> NativeFn {
    NativeFn::new(3, |args, _ctx| {
        let (Some(unit), Some(a), Some(b)) = (args[0].as_str(), as_ts(&args[1]), as_ts(&args[2]))
        else {
            return Ok(Value::Null);
        };
        let result = match unit {
            "seconds" => (a - b).num_seconds() as f64,
            "minutes" => (a - b).num_minutes() as f64,
            "hours" => (a - b).num_hours() as f64,
            "days" => (a - b).num_days() as f64,
            "months" => date::months_between(a.date_naive(), b.date_naive()),
            "years" => date::months_between(a.date_naive(), b.date_naive()) / 12.0,
            _ => return Ok(Value::Null),
        };
        Ok(Value::Number(result))
    })
}

/// `ts_get(ts, tz, component)`.
pub fn ts_get() -> NativeFn {
    NativeFn::new(3, |args, _ctx| {
        let (Some(ts), Some(tz), Some(component)) =
            (as_ts(&args[0]), args[1].as_number(), args[2].as_str())
        else {
            return Ok(Value::Null);
        };
        let local = local_naive(ts, tz as i64);
        let n = match component {
            "year" => local.year() as f64,
            "month" => local.month() as f64,
            "day" => local.day() as f64,
            "hour" => local.hour() as f64,
            "minute" => local.minute() as f64,
            "second" => local.second() as f64,
            "weekday" => local.weekday().num_days_from_monday() as f64,
            _ => return Ok(Value::Null),
        };
        Ok(Value::Number(n))
    })
}

/// `ts_set(ts, tz, component, value)`.
pub fn ts_set() -> NativeFn {
    NativeFn::new(4, |args, _ctx| {
        let (Some(ts), Some(tz), Some(component), Some(value)) =
            (as_ts(&args[0]), args[1].as_number(), args[2].as_str(), args[3].as_number())
        else {
            return Ok(Value::Null);
        };
        let tz = tz as i64;
        let local = local_naive(ts, tz);
        let updated = match component {
            "year" => NaiveDate::from_ymd_opt(value as i32, local.month(), local.day()).map(|d| d.and_time(local.time())),
            "month" => NaiveDate::from_ymd_opt(local.year(), value as u32, local.day()).map(|d| d.and_time(local.time())),
            "day" => NaiveDate::from_ymd_opt(local.year(), local.month(), value as u32).map(|d| d.and_time(local.time())),
            "hour" => NaiveTime::from_hms_opt(value as u32, local.minute(), local.second()).map(|t| local.date().and_time(t)),
            "minute" => NaiveTime::from_hms_opt(local.hour(), value as u32, local.second()).map(|t| local.date().and_time(t)),
            "second" => NaiveTime::from_hms_opt(local.hour(), local.minute(), value as u32).map(|t| local.date().and_time(t)),
            _ => None,
        };
        Ok(updated.map(|naive| Value::Timestamp(to_utc(naive, tz))).unwrap_or(Value::Null))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_eval::Callable;
    use axon_eval::EvalContext;

    fn ctx<'a>() -> EvalContext<'a> {
        EvalContext::new(vec![], || false, |_| Value::Null)
    }

    #[test]
    fn round_trips_through_unix_seconds() {
        let ts = ts_from_unix().apply(&[Value::Number(1_600_000_000.0)], &mut ctx()).unwrap();
        let back = ts_to_unix().apply(&[ts], &mut ctx()).unwrap();
        assert_eq!(back, Value::Number(1_600_000_000.0));
    }

    #[test]
    fn from_date_and_back_round_trips_at_zero_offset() {
        let date = Value::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let ts = ts_from_date().apply(&[date.clone(), Value::Number(0.0)], &mut ctx()).unwrap();
        let back = ts_to_date().apply(&[ts, Value::Number(0.0)], &mut ctx()).unwrap();
        assert_eq!(back, date);
    }
}

//! Process-wide extension slots (spec §6.4, §5 "Extension injection").
//!
//! Optional host-injected formatters are populated lazily; writes are
//! host-serialized and observed on the next stdlib invocation. When a slot
//! is unset the corresponding stdlib function returns `null`.

use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

pub type CountryNameFn = dyn Fn(&str) -> Option<String> + Send + Sync;
pub type CurrencyFormatFn = dyn Fn(&str, u32, f64) -> String + Send + Sync;
pub type PhoneFormatFn = dyn Fn(&str, &str) -> Option<String> + Send + Sync;

#[derive(Default)]
struct Slots {
    country_name: Option<Arc<CountryNameFn>>,
    format_currency: Option<Arc<CurrencyFormatFn>>,
    phone_format: Option<Arc<PhoneFormatFn>>,
}

static SLOTS: Lazy<RwLock<Slots>> = Lazy::new(|| RwLock::new(Slots::default()));

/// Host-facing installer (spec §6.4). Each setter is independent; installing
/// one does not require the others.
pub struct Extensions;

impl Extensions {
    pub fn install_country_name(f: impl Fn(&str) -> Option<String> + Send + Sync + 'static) {
        SLOTS.write().unwrap().country_name = Some(Arc::new(f));
    }

    pub fn install_format_currency(f: impl Fn(&str, u32, f64) -> String + Send + Sync + 'static) {
        SLOTS.write().unwrap().format_currency = Some(Arc::new(f));
    }

    pub fn install_phone_format(f: impl Fn(&str, &str) -> Option<String> + Send + Sync + 'static) {
        SLOTS.write().unwrap().phone_format = Some(Arc::new(f));
    }

    pub fn uninstall_all() {
        let mut slots = SLOTS.write().unwrap();
        slots.country_name = None;
        slots.format_currency = None;
        slots.phone_format = None;
    }
}

pub(crate) fn country_name(code: &str) -> Option<String> {
    let slots = SLOTS.read().unwrap();
    slots.country_name.as_ref().and_then(|f| f(code))
}

pub(crate) fn format_currency(code: &str, minor_units: u32, major: f64) -> Option<String> {
    let slots = SLOTS.read().unwrap();
    slots.format_currency.as_ref().map(|f| f(code, minor_units, major))
}

pub(crate) fn format_phone(region: &str, number: &str) -> Option<String> {
    let slots = SLOTS.read().unwrap();
    slots.phone_format.as_ref().and_then(|f| f(region, number))
}

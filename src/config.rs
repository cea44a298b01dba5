use serde::{Deserialize, Serialize};

/// Base URL of the expense backend. Empty means same-origin.
pub const API_BASE_URL: &str = match option_env!("EXPENSE_API_BASE") {
    Some(base) => base,
    None => "",
};

pub const BANNER_DISMISS_MS: u64 = 5_000;
pub const COUNT_UP_STEPS: u32 = 50;
pub const COUNT_UP_TICK_MS: u64 = 20;
pub const BUDGET_BAR_DELAY_MS: u64 = 100;

const SETTINGS_KEY: &str = "settings";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub currency_code: String,
    pub currency_symbol: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl AppSettings {
    pub fn for_currency(code: &str) -> Self {
        AppSettings {
            currency_code: code.to_string(),
            currency_symbol: currency_symbol_for(code).to_string(),
        }
    }
}

pub const CURRENCIES: &[(&str, &str)] = &[
    ("USD", "USD ($)"),
    ("EUR", "EUR (€)"),
    ("GBP", "GBP (£)"),
    ("JPY", "JPY (¥)"),
    ("PHP", "PHP (₱)"),
];

pub fn currency_symbol_for(code: &str) -> &'static str {
    match code {
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "PHP" => "₱",
        _ => "$",
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn parse_settings(raw: &str) -> Option<AppSettings> {
    serde_json::from_str::<AppSettings>(raw).ok()
}

pub fn load_settings() -> AppSettings {
    let Some(storage) = local_storage() else {
        return AppSettings::default();
    };
    match storage.get_item(SETTINGS_KEY) {
        Ok(Some(raw)) => parse_settings(&raw).unwrap_or_else(|| {
            log::warn!("ignoring unreadable settings in localStorage");
            AppSettings::default()
        }),
        _ => AppSettings::default(),
    }
}

pub fn save_settings(settings: &AppSettings) {
    if let Some(storage) = local_storage() {
        if let Ok(raw) = serde_json::to_string(settings) {
            if storage.set_item(SETTINGS_KEY, &raw).is_err() {
                log::warn!("could not persist settings");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip_through_json() {
        let settings = AppSettings::for_currency("EUR");
        let raw = serde_json::to_string(&settings).unwrap();
        assert_eq!(parse_settings(&raw), Some(settings));
    }

    #[test]
    fn unknown_currency_falls_back_to_dollar() {
        assert_eq!(currency_symbol_for("XYZ"), "$");
        assert_eq!(AppSettings::for_currency("JPY").currency_symbol, "¥");
    }

    #[test]
    fn garbage_settings_are_rejected() {
        assert_eq!(parse_settings("{not json"), None);
        assert_eq!(parse_settings("{\"currency_code\":\"USD\"}"), None);
    }
}

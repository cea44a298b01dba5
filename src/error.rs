use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] gloo_net::Error),

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Nothing to export yet")]
    NothingToExport,
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Wraps a `JsValue` error from a web-sys or js-sys call.
pub fn dom_err(context: &str, err: wasm_bindgen::JsValue) -> AppError {
    AppError::Dom(format!("{}: {:?}", context, err))
}

//! The bundled HTML forms
//!
//! Pages are compiled into the binary. When `STATIC_DIR` is set, a file of
//! the same name in that directory takes precedence so the forms can be
//! restyled without a rebuild.

use std::path::PathBuf;

use actix_web::{http::header::ContentType, web, HttpResponse};

use mo_core::services::otp::{MailServiceTrait, OtpStoreTrait};

use crate::app::AppState;

const GENERATE_HTML: &str = include_str!("../../static/generate.html");
const VERIFY_HTML: &str = include_str!("../../static/verify.html");

/// Source of the HTML pages
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    override_dir: Option<PathBuf>,
}

impl StaticPages {
    /// Only the bundled pages
    pub fn bundled() -> Self {
        Self::default()
    }

    /// Prefer files from `dir`, falling back to the bundled pages
    pub fn with_override_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            override_dir: Some(dir.into()),
        }
    }

    pub fn from_static_dir(dir: Option<&str>) -> Self {
        match dir {
            Some(dir) if !dir.trim().is_empty() => Self::with_override_dir(dir),
            _ => Self::bundled(),
        }
    }

    /// Load a page by file name
    pub async fn load(&self, name: &str, bundled: &'static str) -> String {
        if let Some(dir) = &self.override_dir {
            let path = dir.join(name);
            match tokio::fs::read_to_string(&path).await {
                Ok(html) => return html,
                Err(e) => log::debug!("Using bundled {} ({}: {})", name, path.display(), e),
            }
        }
        bundled.to_string()
    }
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

/// GET /generate
pub async fn generate_page<M, S>(state: web::Data<AppState<M, S>>) -> HttpResponse
where
    M: MailServiceTrait + ?Sized + 'static,
    S: OtpStoreTrait + ?Sized + 'static,
{
    html(state.pages.load("generate.html", GENERATE_HTML).await)
}

/// GET /verify
pub async fn verify_page<M, S>(state: web::Data<AppState<M, S>>) -> HttpResponse
where
    M: MailServiceTrait + ?Sized + 'static,
    S: OtpStoreTrait + ?Sized + 'static,
{
    html(state.pages.load("verify.html", VERIFY_HTML).await)
}

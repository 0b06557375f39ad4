use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};
use url::Url;
use vf_core::{
    BackendStatus, DataUrl, Error, HealthReport, ImageVerification, Result, Service,
    TextVerification, Verifier, VerifyError, VerifyResult,
};

use crate::Config;

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    image: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
struct Endpoints {
    check: Url,
    health: Url,
}

impl Endpoints {
    fn new(base: &str, service: Service) -> Result<Self> {
        let base = parse_base(base)?;
        let join = |path: &str| {
            base.join(path)
                .map_err(|e| Error::InvalidUrl(format!("{}{}: {}", base, path, e)))
        };
        Ok(Self {
            check: join(service.check_path())?,
            health: join("health")?,
        })
    }
}

/// Base URLs are treated as directories so `/check` lands under any prefix.
fn parse_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!("{}: not an http(s) base URL", raw)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Talks to the two detection backends over HTTP.
pub struct HttpVerifier {
    client: Client,
    text: Endpoints,
    image: Endpoints,
}

impl HttpVerifier {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            text: Endpoints::new(&config.text_url, Service::Text)?,
            image: Endpoints::new(&config.image_url, Service::Image)?,
        })
    }

    fn endpoints(&self, service: Service) -> &Endpoints {
        match service {
            Service::Text => &self.text,
            Service::Image => &self.image,
        }
    }

    async fn post<B, T>(&self, service: Service, body: &B) -> VerifyResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let endpoint = &self.endpoints(service).check;
        debug!("📤 POST {}", endpoint);
        let response = self
            .client
            .post(endpoint.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(service, endpoint, &e))?;
        decode(service, endpoint, response).await
    }
}

fn transport_error(service: Service, endpoint: &Url, err: &reqwest::Error) -> VerifyError {
    warn!("🔌 {} not reachable at {}: {}", service, endpoint, err);
    VerifyError::Transport {
        service,
        endpoint: endpoint.to_string(),
        port: endpoint.port_or_known_default(),
        reason: err.to_string(),
    }
}

async fn decode<T: DeserializeOwned>(
    service: Service,
    endpoint: &Url,
    response: Response,
) -> VerifyResult<T> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| transport_error(service, endpoint, &e))?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty());
        warn!("❗ {} answered {}: {:?}", service, status, message);
        return Err(VerifyError::Server {
            service,
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|e| {
        warn!("❗ {} sent an unreadable body: {}", service, e);
        VerifyError::Decode {
            service,
            reason: e.to_string(),
        }
    })
}

impl fmt::Debug for HttpVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpVerifier")
            .field("client", &"<reqwest::Client>")
            .field("text", &self.text.check.as_str())
            .field("image", &self.image.check.as_str())
            .finish()
    }
}

#[async_trait]
impl Verifier for HttpVerifier {
    fn name(&self) -> &str {
        "HTTP"
    }

    fn endpoint(&self, service: Service) -> String {
        self.endpoints(service).check.to_string()
    }

    async fn check_text(&self, text: &str) -> VerifyResult<TextVerification> {
        let result: TextVerification = self.post(Service::Text, &TextRequest { text }).await?;
        info!("📰 Text verdict: {} ({}%)", result.verdict, result.credibility);
        Ok(result)
    }

    async fn check_image(&self, image: &DataUrl) -> VerifyResult<ImageVerification> {
        debug!("🖼️ Posting image ({}, {} bytes encoded)", image.mime_type(), image.len());
        let result: ImageVerification = self
            .post(Service::Image, &ImageRequest { image: image.as_str() })
            .await?;
        info!("🖼️ Image verdict: {} ({}%)", result.verdict, result.credibility);
        Ok(result)
    }

    async fn health(&self, service: Service) -> BackendStatus {
        let endpoint = &self.endpoints(service).health;
        match self.client.get(endpoint.clone()).send().await {
            Ok(response) => {
                let status = response.status();
                let report = if status.is_success() {
                    response.json::<HealthReport>().await.ok()
                } else {
                    None
                };
                BackendStatus {
                    service,
                    endpoint: endpoint.to_string(),
                    reachable: true,
                    http_status: Some(status.as_u16()),
                    report,
                    error: None,
                }
            }
            Err(e) => BackendStatus {
                service,
                endpoint: endpoint.to_string(),
                reachable: false,
                http_status: None,
                report: None,
                error: Some(e.to_string()),
            },
        }
    }
}

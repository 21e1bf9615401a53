//! Client for the EmailJS REST API that delivers contact-form messages.

use gloo_net::http::Request;
use log::{info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::config;
use crate::contact::form::ContactFields;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("email service rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Serialize, Debug)]
pub struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

/// Field names match the `name` attributes of the form inputs, which is
/// what the template refers to.
#[derive(Serialize, Debug)]
struct TemplateParams<'a> {
    user_name: &'a str,
    user_email: &'a str,
    message: &'a str,
}

#[derive(Clone, Debug)]
pub struct EmailJs {
    endpoint: &'static str,
    public_key: &'static str,
    service_id: &'static str,
    template_id: &'static str,
}

impl EmailJs {
    pub fn from_config() -> Self {
        Self {
            endpoint: config::get_email_api_url(),
            public_key: config::EMAILJS_PUBLIC_KEY,
            service_id: config::EMAILJS_SERVICE_ID,
            template_id: config::EMAILJS_TEMPLATE_ID,
        }
    }

    pub fn request<'a>(&'a self, fields: &'a ContactFields) -> SendRequest<'a> {
        SendRequest {
            service_id: self.service_id,
            template_id: self.template_id,
            user_id: self.public_key,
            template_params: TemplateParams {
                user_name: &fields.name,
                user_email: &fields.email,
                message: &fields.message,
            },
        }
    }

    pub async fn send(&self, fields: &ContactFields) -> Result<(), DeliveryError> {
        let response = Request::post(self.endpoint)
            .json(&self.request(fields))
            .map_err(|e| DeliveryError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| DeliveryError::Request(e.to_string()))?;

        let ok = response.ok();
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if ok {
            info!("Contact message sent: {} {}", status, body);
            Ok(())
        } else {
            warn!("Contact message rejected: {} {}", status, body);
            Err(DeliveryError::Rejected { status, body })
        }
    }
}

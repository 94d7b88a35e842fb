//! Contentful Content Delivery API client.
//!
//! Issues `GET /spaces/{space}/environments/{env}/entries` requests with a
//! bearer token and hands the raw collection to the shared queries. Only the
//! query parameters the site needs are supported: `content_type`,
//! `fields.<name>` equality, `include`, `limit`, `order`, and `locale`.

use super::entries::EntryCollection;
use super::query::{self, EntryStore, Query};
use super::{ContentError, ContentSource, QueryOptions};
use crate::config::ContentfulConfig;
use crate::types::{Contact, GlobalSettings, PageFields, Project};
use async_trait::async_trait;
use log::debug;
use std::time::Duration;

pub struct ContentfulClient {
    http: reqwest::Client,
    entries_url: String,
    access_token: String,
    locale: Option<String>,
}

impl ContentfulClient {
    /// Build a client from config, reading the access token from the
    /// configured environment variable.
    pub fn from_config(config: &ContentfulConfig, locale: &str) -> Result<Self, ContentError> {
        let access_token = std::env::var(&config.access_token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ContentError::MissingToken(config.access_token_env.clone()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let mut client = Self::new(http, config, access_token);
        if !locale.is_empty() {
            client.locale = Some(locale.to_string());
        }
        Ok(client)
    }

    pub fn new(http: reqwest::Client, config: &ContentfulConfig, access_token: String) -> Self {
        Self {
            http,
            entries_url: entries_url(config),
            access_token,
            locale: None,
        }
    }

    /// Query-string parameters for `query`, in a stable order.
    pub fn query_params(&self, query: &Query) -> Vec<(String, String)> {
        let mut params = vec![("content_type".to_string(), query.content_type.to_string())];
        for (name, value) in &query.field_filters {
            params.push((format!("fields.{name}"), value.clone()));
        }
        params.push(("include".to_string(), query.include.to_string()));
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(order) = query.order {
            params.push(("order".to_string(), order.to_string()));
        }
        if let Some(locale) = &self.locale {
            params.push(("locale".to_string(), locale.clone()));
        }
        params
    }
}

fn entries_url(config: &ContentfulConfig) -> String {
    format!(
        "https://{}/spaces/{}/environments/{}/entries",
        config.host, config.space_id, config.environment
    )
}

#[async_trait]
impl EntryStore for ContentfulClient {
    async fn query(&self, query: &Query) -> Result<EntryCollection, ContentError> {
        let params = self.query_params(query);
        debug!("GET {} {:?}", self.entries_url, params);

        let response = self
            .http
            .get(&self.entries_url)
            .bearer_auth(&self.access_token)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        Ok(response.json::<EntryCollection>().await?)
    }
}

#[async_trait]
impl ContentSource for ContentfulClient {
    async fn fetch_page_fields(
        &self,
        page_key: &str,
        options: QueryOptions,
    ) -> Result<PageFields, ContentError> {
        query::page_fields(self, page_key, options).await
    }

    async fn fetch_global_settings(&self) -> Result<GlobalSettings, ContentError> {
        query::global_settings(self).await
    }

    async fn fetch_project(&self, slug: &str) -> Result<Project, ContentError> {
        query::project(self, slug).await
    }

    async fn fetch_project_ids(&self) -> Result<Vec<String>, ContentError> {
        query::project_ids(self).await
    }

    async fn fetch_contact(&self) -> Result<Contact, ContentError> {
        query::contact(self).await
    }
}

// yadup backs up local directories to Yandex.Disk
// Copyright (C) 2025  yadup contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::{fs::File, path::Path};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use reqwest::{
    StatusCode,
    blocking::{Client, Response},
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::Deserialize;

use super::{RemoteEntry, RemoteStorage};
use crate::defaults::LIST_PAGE_SIZE;

const API_BASE_URL: &str = "https://cloud-api.yandex.net/v1/disk";

/// Yandex.Disk application credentials.
///
/// Only the OAuth token goes on the wire; the application id and secret are
/// the registered application identity the token was issued for.
pub struct Credentials {
    pub app_id: String,
    pub app_secret: String,
    pub token: String,
}

/// Client for the Yandex.Disk REST API.
pub struct YaDisk {
    http: Client,
    credentials: Credentials,
}

#[derive(Deserialize)]
struct Resource {
    #[serde(rename = "_embedded")]
    embedded: Option<Embedded>,
}

#[derive(Deserialize)]
struct Embedded {
    items: Vec<ResourceItem>,
    total: u64,
}

#[derive(Deserialize)]
struct ResourceItem {
    path: String,
    name: String,
    created: DateTime<Utc>,
}

#[derive(Deserialize)]
struct UploadLink {
    href: String,
    method: String,
}

#[derive(Deserialize, Default)]
struct ApiError {
    message: Option<String>,
    description: Option<String>,
}

impl YaDisk {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("OAuth {}", credentials.token))
            .with_context(|| "Invalid OAuth token")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .with_context(|| "Could not build the HTTP client")?;

        Ok(Self { http, credentials })
    }

    /// The application identity this client was built with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Turns a non-success response into an error carrying the status and the
    /// service's own diagnostic message.
    fn api_error(response: Response, action: &str) -> anyhow::Error {
        let status = response.status();
        let err = response.json::<ApiError>().unwrap_or_default();
        let detail = err.message.or(err.description).unwrap_or_default();
        anyhow!("{action}: HTTP {status} {detail}")
    }

    fn checked(response: Response, action: &str) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::api_error(response, action))
        }
    }
}

impl RemoteStorage for YaDisk {
    fn exists(&self, path: &str) -> Result<bool> {
        let response = self
            .http
            .get(format!("{API_BASE_URL}/resources"))
            .query(&[("path", path), ("fields", "path")])
            .send()
            .with_context(|| "Could not reach Yandex.Disk")?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(Self::api_error(
                response,
                &format!("Could not check whether '{path}' exists"),
            )),
        }
    }

    fn create_dir(&self, path: &str) -> Result<()> {
        let response = self
            .http
            .put(format!("{API_BASE_URL}/resources"))
            .query(&[("path", path)])
            .send()
            .with_context(|| "Could not reach Yandex.Disk")?;
        Self::checked(response, &format!("Could not create directory '{path}'"))?;
        Ok(())
    }

    fn list_dir(&self, path: &str) -> Result<Vec<RemoteEntry>> {
        let mut entries = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let response = self
                .http
                .get(format!("{API_BASE_URL}/resources"))
                .query(&[("path", path)])
                .query(&[("limit", LIST_PAGE_SIZE), ("offset", offset)])
                .query(&[(
                    "fields",
                    "_embedded.items.path,_embedded.items.name,_embedded.items.created,_embedded.total",
                )])
                .send()
                .with_context(|| "Could not reach Yandex.Disk")?;
            let resource: Resource =
                Self::checked(response, &format!("Could not list directory '{path}'"))?
                    .json()
                    .with_context(|| "Unexpected listing payload from Yandex.Disk")?;

            // A plain file has no embedded listing.
            let Some(embedded) = resource.embedded else {
                break;
            };

            let total = embedded.total;
            entries.extend(embedded.items.into_iter().map(|item| RemoteEntry {
                path: item.path,
                name: item.name,
                created: item.created,
            }));

            offset += LIST_PAGE_SIZE;
            if entries.len() as u64 >= total {
                break;
            }
        }

        Ok(entries)
    }

    fn upload(&self, local: &Path, remote: &str) -> Result<()> {
        let response = self
            .http
            .get(format!("{API_BASE_URL}/resources/upload"))
            .query(&[("path", remote), ("overwrite", "true")])
            .send()
            .with_context(|| "Could not reach Yandex.Disk")?;
        let link: UploadLink = Self::checked(
            response,
            &format!("Could not request an upload link for '{remote}'"),
        )?
        .json()
        .with_context(|| "Unexpected upload link payload from Yandex.Disk")?;

        let file = File::open(local)
            .with_context(|| format!("Could not open '{}'", local.to_string_lossy()))?;
        let method = link
            .method
            .parse::<reqwest::Method>()
            .with_context(|| format!("Invalid upload method '{}'", link.method))?;

        let response = self
            .http
            .request(method, &link.href)
            .body(file)
            .send()
            .with_context(|| "Could not reach the upload endpoint")?;
        Self::checked(response, &format!("Could not upload '{remote}'"))?;
        Ok(())
    }

    fn remove_all(&self, path: &str) -> Result<()> {
        // 202 means the service deletes asynchronously; both count as done.
        let response = self
            .http
            .delete(format!("{API_BASE_URL}/resources"))
            .query(&[("path", path), ("permanently", "true")])
            .send()
            .with_context(|| "Could not reach Yandex.Disk")?;
        Self::checked(response, &format!("Could not remove '{path}'"))?;
        Ok(())
    }
}

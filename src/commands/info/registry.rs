use crate::error::{OpkError, Result};
use crate::project_identity;
use colored::Colorize;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;

const TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Deserialize)]
pub struct PackageDocument {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub license: Option<Value>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub repository: Option<Repository>,
    #[serde(default)]
    pub maintainers: Vec<Maintainer>,
    #[serde(default)]
    pub versions: BTreeMap<String, VersionData>,
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: BTreeMap<String, String>,
    #[serde(default)]
    pub time: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Repository {
    Url(String),
    Object {
        #[serde(default)]
        url: Option<String>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Maintainer {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionData {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub license: Option<Value>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dist: Option<Dist>,
    #[serde(default)]
    pub maintainers: Vec<Maintainer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dist {
    #[serde(default)]
    pub tarball: Option<String>,
    #[serde(default)]
    pub shasum: Option<String>,
    #[serde(default)]
    pub integrity: Option<String>,
    #[serde(default)]
    pub unpacked_size: Option<u64>,
}

/// Registry URL for a package; the scope separator is escaped
pub fn package_url(name: &str) -> String {
    format!(
        "{}/{}",
        project_identity::REGISTRY_BASE_URL,
        name.replace('/', "%2f")
    )
}

pub fn fetch_package(name: &str) -> Result<PackageDocument> {
    let client = Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .user_agent(format!(
            "{}/{}",
            project_identity::BINARY_NAME,
            project_identity::current_version()
        ))
        .build()
        .map_err(|e| OpkError::RemoteFetchError(e.to_string()))?;

    let url = package_url(name);
    crate::ui::debug(&format!("GET {}", url));

    let resp = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .map_err(|e| OpkError::RemoteFetchError(format!("network error: {}", e)))?;

    if !resp.status().is_success() {
        return Err(OpkError::RemoteFetchError(format!(
            "failed to fetch package info for {} ({})",
            name,
            resp.status()
        )));
    }

    resp.json::<PackageDocument>()
        .map_err(|e| OpkError::RemoteFetchError(format!("invalid registry response: {}", e)))
}

/// Summary of the latest release
pub fn render_package(doc: &PackageDocument) -> Result<String> {
    let latest = doc
        .dist_tags
        .get("latest")
        .and_then(|tag| doc.versions.get(tag).map(|data| (tag, data)));
    let Some((latest, data)) = latest else {
        return Err(OpkError::RemoteFetchError(format!(
            "no latest version found for {}",
            doc.name
        )));
    };

    let license = license_text(data.license.as_ref())
        .or_else(|| license_text(doc.license.as_ref()))
        .unwrap_or_else(|| "unknown".to_string());
    let description = data
        .description
        .as_deref()
        .or(doc.description.as_deref())
        .unwrap_or("");
    let link = doc
        .homepage
        .clone()
        .or_else(|| doc.repository.as_ref().and_then(repository_url));
    let bar = "|".dimmed();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {} {} deps: {} {} versions: {}",
        format!("{}@{}", doc.name, latest).magenta().bold(),
        bar,
        license.bright_purple(),
        bar,
        data.dependencies.len(),
        bar,
        doc.versions.len()
    );
    if !description.is_empty() {
        let _ = writeln!(out, "{}", description);
    }
    if let Some(link) = link {
        let _ = writeln!(out, "{}", link.purple());
    }
    if !doc.keywords.is_empty() {
        let _ = writeln!(out, "{} {}", "keywords:".purple(), doc.keywords.join(", "));
    }

    let _ = writeln!(
        out,
        "\n{}",
        format!("dependencies ({}):", data.dependencies.len()).purple()
    );
    if data.dependencies.is_empty() {
        let _ = writeln!(out, "{} none", "•".magenta());
    }
    for (name, version) in &data.dependencies {
        let _ = writeln!(out, "{} {}: {}", "•".magenta(), name, version.dimmed());
    }

    if let Some(dist) = &data.dist {
        let _ = writeln!(out, "\n{}", "dist".purple());
        let fields = [
            ("tarball", dist.tarball.as_deref()),
            ("shasum", dist.shasum.as_deref()),
            ("integrity", dist.integrity.as_deref()),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                let _ = writeln!(out, " {} {}: {}", "·".magenta(), key, value);
            }
        }
        let _ = writeln!(
            out,
            " {} unpackedSize: {}",
            "·".magenta(),
            format_size(dist.unpacked_size)
        );
    }

    if !doc.dist_tags.is_empty() {
        let _ = writeln!(out, "\n{}", "dist-tags:".purple());
        for (tag, version) in &doc.dist_tags {
            let _ = writeln!(out, "{}: {}", tag.magenta(), version);
        }
    }

    let maintainers = if data.maintainers.is_empty() {
        &doc.maintainers
    } else {
        &data.maintainers
    };
    if !maintainers.is_empty() {
        let _ = writeln!(out, "\n{}", "maintainers:".purple());
        for m in maintainers {
            match &m.email {
                Some(email) => {
                    let _ = writeln!(out, "{} {} <{}>", "•".magenta(), m.name, email);
                }
                None => {
                    let _ = writeln!(out, "{} {}", "•".magenta(), m.name);
                }
            }
        }
    }

    if let Some(published) = doc.time.get(latest) {
        let _ = writeln!(out, "\n{} {}", "Published:".purple(), published);
    }

    Ok(out)
}

/// `license` is a string in current packages and `{ "type": ... }` in old ones
fn license_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("type").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Browser URL for a repository field
fn repository_url(repo: &Repository) -> Option<String> {
    let raw = match repo {
        Repository::Url(url) => url.as_str(),
        Repository::Object { url } => url.as_deref()?,
    };
    let mut url = raw.strip_prefix("git+").unwrap_or(raw).to_string();
    if let Some(rest) = url.strip_prefix("git://") {
        url = format!("https://{}", rest);
    }
    if let Some(rest) = url.strip_prefix("git@github.com:") {
        url = format!("https://github.com/{}", rest);
    }
    if let Some(rest) = url.strip_suffix(".git") {
        url = rest.to_string();
    }
    Some(url)
}

fn format_size(bytes: Option<u64>) -> String {
    match bytes {
        None | Some(0) => "unknown".to_string(),
        Some(b) if b < 1024 => format!("{} B", b),
        Some(b) if b < 1024 * 1024 => format!("{:.2} KB", b as f64 / 1024.0),
        Some(b) => format!("{:.2} MB", b as f64 / (1024.0 * 1024.0)),
    }
}

use crate::error::{Error, Result};
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::fs;
use std::path::Path;

pub const DEFAULT_LOCATION: &str = "http://ftp.apnic.net/apnic/stats/apnic/delegated-apnic-latest";

/// Registry text from a `http(s)://` URL or a local path.
pub fn fetch(location: &str) -> Result<String> {
    let data = if location.starts_with("http://") || location.starts_with("https://") {
        fetch_url(&Client::builder().build()?, location)?
    } else {
        fetch_file(location)?
    };
    info!("read {} bytes from {}", data.len(), location);
    Ok(data)
}

fn fetch_url(client: &Client, url: &str) -> Result<String> {
    debug!("GET {}", url);
    let response = client.get(url).send()?;
    if response.status() != StatusCode::OK {
        return Err(Error::Status(response.status().as_u16()));
    }
    Ok(response.text()?)
}

fn fetch_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! US Census API client for county broadband statistics.
//!
//! Handles:
//! - State name to FIPS code resolution (table cached after the first fetch)
//! - County name to county code resolution
//! - Broadband percentage lookup (ACS subject table S2802)

use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// ACS variable: percent of households with a broadband subscription.
const BROADBAND_VARIABLE: &str = "S2802_C03_022E";

/// State and county FIPS codes identifying one county.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaCode {
    pub state: String,
    pub county: String,
}

/// Broadband lookup result for a named county.
#[derive(Debug, Clone, PartialEq)]
pub struct BroadbandData {
    pub state: String,
    pub county: String,
    pub percentage: String,
}

/// Census API client.
#[derive(Clone)]
pub struct CensusClient {
    http: reqwest::Client,
    base_url: String,
    /// Lowercased state name -> (state FIPS code, canonical name)
    state_codes: Arc<OnceCell<HashMap<String, (String, String)>>>,
}

impl CensusClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            state_codes: Arc::new(OnceCell::new()),
        }
    }

    /// Broadband percentage for a county, addressed by state and county name.
    pub async fn broadband(&self, state: &str, county: &str) -> Result<BroadbandData, AppError> {
        let (state_code, state_name) = self.state_code(state).await?;

        let url = format!("{}/2010/dec/sf1", self.base_url);
        let rows = self
            .get_rows(
                &url,
                &[
                    ("get", "NAME".to_string()),
                    ("for", "county:*".to_string()),
                    ("in", format!("state:{}", state_code)),
                ],
            )
            .await?;
        let county_code = find_county_code(&rows, county, &state_name).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown county '{}' in {}", county, state_name))
        })?;

        let area = AreaCode {
            state: state_code,
            county: county_code,
        };
        let percentage = self.lookup(&area).await?;

        tracing::debug!(state = %state_name, county, %percentage, "Broadband lookup");
        Ok(BroadbandData {
            state: state_name,
            county: county.to_string(),
            percentage,
        })
    }

    /// Broadband percentage for a county, addressed by FIPS codes.
    pub async fn lookup(&self, area: &AreaCode) -> Result<String, AppError> {
        let url = format!("{}/2021/acs/acs1/subject/variables", self.base_url);
        let rows = self
            .get_rows(
                &url,
                &[
                    ("get", format!("NAME,{}", BROADBAND_VARIABLE)),
                    ("for", format!("county:{}", area.county)),
                    ("in", format!("state:{}", area.state)),
                ],
            )
            .await?;
        parse_broadband(&rows)
    }

    async fn state_code(&self, state: &str) -> Result<(String, String), AppError> {
        let codes = self
            .state_codes
            .get_or_try_init(|| async {
                let url = format!("{}/2010/dec/sf1", self.base_url);
                let rows = self
                    .get_rows(
                        &url,
                        &[("get", "NAME".to_string()), ("for", "state:*".to_string())],
                    )
                    .await?;
                let codes = parse_state_codes(&rows);
                tracing::info!(count = codes.len(), "Cached Census state codes");
                Ok::<_, AppError>(codes)
            })
            .await?;

        codes
            .get(&state.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| AppError::BadRequest(format!("Unknown state '{}'", state)))
    }

    async fn get_rows(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Vec<String>>, AppError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::CensusApi(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::CensusApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::CensusApi(format!("Unexpected response shape: {}", e)))
    }
}

/// Build the state table from `[["NAME","state"],["Alabama","01"],...]`.
fn parse_state_codes(rows: &[Vec<String>]) -> HashMap<String, (String, String)> {
    rows.iter()
        .skip(1)
        .filter_map(|row| match row.as_slice() {
            [name, code, ..] => Some((name.to_lowercase(), (code.clone(), name.clone()))),
            _ => None,
        })
        .collect()
}

/// Find a county code in `[["NAME","state","county"],["Kings County, California","06","031"],...]`.
///
/// Accepts the bare county name or the full `"<county>, <state>"` form.
fn find_county_code(rows: &[Vec<String>], county: &str, state_name: &str) -> Option<String> {
    let county = county.trim().to_lowercase();
    let full_name = format!("{}, {}", county, state_name.to_lowercase());

    rows.iter().skip(1).find_map(|row| match row.as_slice() {
        [name, _state, code, ..] => {
            let name = name.to_lowercase();
            (name == full_name || name == county).then(|| code.clone())
        }
        _ => None,
    })
}

/// Pull the broadband value out of `[["NAME","S2802_C03_022E","state","county"],[..,"83.5",..]]`.
fn parse_broadband(rows: &[Vec<String>]) -> Result<String, AppError> {
    let header = rows
        .first()
        .ok_or_else(|| AppError::CensusApi("Empty broadband response".to_string()))?;
    let column = header
        .iter()
        .position(|h| h == BROADBAND_VARIABLE)
        .ok_or_else(|| AppError::CensusApi(format!("Missing {} column", BROADBAND_VARIABLE)))?;

    rows.get(1)
        .and_then(|row| row.get(column))
        .cloned()
        .ok_or_else(|| AppError::CensusApi("No broadband data for this county".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_parse_state_codes_skips_header() {
        let codes = parse_state_codes(&rows(&[
            &["NAME", "state"],
            &["California", "06"],
            &["Rhode Island", "44"],
            &["broken"],
        ]));

        assert_eq!(codes.len(), 2);
        assert_eq!(
            codes.get("rhode island"),
            Some(&("44".to_string(), "Rhode Island".to_string()))
        );
        assert!(!codes.contains_key("name"));
    }

    #[test]
    fn test_find_county_code() {
        let table = rows(&[
            &["NAME", "state", "county"],
            &["Kings County, California", "06", "031"],
            &["Kern County, California", "06", "029"],
        ]);

        assert_eq!(
            find_county_code(&table, "Kings County", "California"),
            Some("031".to_string())
        );
        assert_eq!(
            find_county_code(&table, "kern county, california", "California"),
            Some("029".to_string())
        );
        assert_eq!(find_county_code(&table, "Kings", "California"), None);
        assert_eq!(find_county_code(&table, "NAME", "California"), None);
    }

    #[test]
    fn test_parse_broadband() {
        let table = rows(&[
            &["NAME", "S2802_C03_022E", "state", "county"],
            &["Kings County, California", "83.5", "06", "031"],
        ]);
        assert_eq!(parse_broadband(&table).unwrap(), "83.5");
    }

    #[test]
    fn test_parse_broadband_errors() {
        let header_only = rows(&[&["NAME", "S2802_C03_022E", "state", "county"]]);
        assert!(matches!(
            parse_broadband(&header_only),
            Err(AppError::CensusApi(_))
        ));

        let wrong_column = rows(&[&["NAME", "OTHER"], &["x", "1"]]);
        assert!(matches!(
            parse_broadband(&wrong_column),
            Err(AppError::CensusApi(_))
        ));

        assert!(matches!(parse_broadband(&[]), Err(AppError::CensusApi(_))));
    }

    #[tokio::test]
    async fn test_unreachable_census_api_is_gateway_error() {
        let client = CensusClient::new("http://127.0.0.1:9");
        let err = client.broadband("California", "Kings County").await.unwrap_err();
        assert!(matches!(err, AppError::CensusApi(_)));
    }
}

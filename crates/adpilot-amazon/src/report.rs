// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Async report protocol: submit a report definition, poll until terminal,
//! download and decompress the result.
//!
//! The poll loop is strictly sequential -- one outstanding status request at
//! a time, fixed spacing -- and terminates early on `COMPLETED` (download)
//! or `FAILURE` (raise, no retry). Exhausting the attempt budget raises
//! [`AdpilotError::ReportTimeout`] without attempting another poll.

use std::io::Read;
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::Method;
use tracing::{debug, info, warn};

use adpilot_core::{AdpilotError, DateRange, RawMetricsRow};

use crate::client::{AdsClient, request_error};
use crate::types::{ReportConfiguration, ReportCreated, ReportRequest, ReportStatus};

/// Spacing between status polls.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Maximum status polls per report (a 120-second ceiling at 2 s spacing).
pub(crate) const MAX_POLLS: u32 = 60;

impl AdsClient {
    /// Generates and downloads the Sponsored Products campaign summary
    /// report for the given period.
    pub async fn campaign_report(
        &self,
        range: &DateRange,
    ) -> Result<Vec<RawMetricsRow>, AdpilotError> {
        let report_id = self.submit_report(range).await?;
        let url = self.poll_report(&report_id).await?;
        self.download_report(&url).await
    }

    async fn submit_report(&self, range: &DateRange) -> Result<String, AdpilotError> {
        let definition = ReportRequest {
            name: format!("sp-campaigns-{}-{}", range.from, range.to),
            start_date: range.from.clone(),
            end_date: range.to.clone(),
            configuration: ReportConfiguration {
                ad_product: "SPONSORED_PRODUCTS",
                group_by: vec!["campaign"],
                columns: vec![
                    "campaignId",
                    "campaignName",
                    "impressions",
                    "clicks",
                    "cost",
                    "purchases7d",
                    "unitsSoldClicks7d",
                    "sales7d",
                ],
                report_type_id: "spCampaigns",
                time_unit: "SUMMARY",
                format: "GZIP_JSON",
            },
        };

        let request = self
            .ads_request(Method::POST, "/reporting/reports", "application/json")
            .await?;
        let response = request
            .body(serde_json::to_string(&definition).map_err(|e| {
                AdpilotError::Internal(format!("failed to serialize report definition: {e}"))
            })?)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdpilotError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let created: ReportCreated = response.json().await.map_err(request_error)?;
        info!(report_id = %created.report_id, from = %range.from, to = %range.to, "report submitted");
        Ok(created.report_id)
    }

    /// Polls the report status until terminal, returning the download URL.
    async fn poll_report(&self, report_id: &str) -> Result<String, AdpilotError> {
        for attempt in 0..self.max_polls {
            tokio::time::sleep(self.poll_interval).await;

            let request = self
                .ads_request(
                    Method::GET,
                    &format!("/reporting/reports/{report_id}"),
                    "application/json",
                )
                .await?;
            let response = match request.send().await {
                Ok(response) => response,
                // A dropped status poll is not terminal; the next attempt
                // may succeed.
                Err(err) => {
                    warn!(attempt, error = %err, "report status poll failed");
                    continue;
                }
            };
            if !response.status().is_success() {
                continue;
            }

            let status: ReportStatus = match response.json().await {
                Ok(status) => status,
                Err(err) => {
                    warn!(attempt, error = %err, "report status body unreadable");
                    continue;
                }
            };

            if attempt % 5 == 0 {
                debug!(attempt = attempt + 1, max = self.max_polls, status = %status.status, "report poll");
            }

            match status.status.as_str() {
                "COMPLETED" => {
                    return status.url.ok_or_else(|| {
                        AdpilotError::Internal("completed report has no download url".into())
                    });
                }
                "FAILURE" => {
                    return Err(AdpilotError::ReportFailed {
                        reason: status
                            .failure_reason
                            .unwrap_or_else(|| "unspecified".to_string()),
                    });
                }
                _ => {}
            }
        }

        Err(AdpilotError::ReportTimeout {
            report_id: report_id.to_string(),
            attempts: self.max_polls,
        })
    }

    /// Downloads the report payload. The download URL is pre-signed, so no
    /// Ads API auth headers are attached.
    async fn download_report(&self, url: &str) -> Result<Vec<RawMetricsRow>, AdpilotError> {
        let response = self.http().get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdpilotError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(request_error)?;
        let text = decode_report_body(&bytes);
        serde_json::from_str(&text)
            .map_err(|e| AdpilotError::Internal(format!("report payload is not valid JSON: {e}")))
    }
}

/// Decompresses a gzip report payload, falling back to treating the bytes
/// as plain text. Some upstream configurations return either.
fn decode_report_body(bytes: &[u8]) -> String {
    let mut decoder = GzDecoder::new(bytes);
    let mut text = String::new();
    match decoder.read_to_string(&mut text) {
        Ok(_) => text,
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use adpilot_config::AmazonConfig;

    fn test_config(server: &MockServer) -> AmazonConfig {
        AmazonConfig {
            client_id: "client-id".into(),
            client_secret: "client-secret".into(),
            refresh_token: "refresh-token".into(),
            profile_id: "profile-1".into(),
            api_base: server.uri(),
            token_url: format!("{}/auth/o2/token", server.uri()),
        }
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/auth/o2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"access_token": "tok-123", "expires_in": 3600}),
            ))
            .mount(server)
            .await;
    }

    fn fast_client(server: &MockServer) -> AdsClient {
        AdsClient::new(test_config(server))
            .unwrap()
            .with_poll_interval(Duration::from_millis(1))
    }

    fn report_rows() -> serde_json::Value {
        serde_json::json!([
            {"campaignId": "111", "campaignName": "Widgets Exact",
             "impressions": 1000, "clicks": 50, "cost": 125.0,
             "purchases7d": 5, "unitsSoldClicks7d": 6, "sales7d": 250.0}
        ])
    }

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[tokio::test]
    async fn report_completes_and_decompresses() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("POST"))
            .and(path("/reporting/reports"))
            .and(body_string_contains("SPONSORED_PRODUCTS"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"reportId": "rep-1"})),
            )
            .mount(&server)
            .await;

        let download_url = format!("{}/download/rep-1", server.uri());
        Mock::given(method("GET"))
            .and(path("/reporting/reports/rep-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"status": "COMPLETED", "url": download_url}),
            ))
            .mount(&server)
            .await;

        let compressed = gzip(report_rows().to_string().as_bytes());
        Mock::given(method("GET"))
            .and(path("/download/rep-1"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(compressed))
            .mount(&server)
            .await;

        let client = fast_client(&server);
        let range = DateRange::new("2026-08-08", "2026-08-14");
        let rows = client.campaign_report(&range).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].campaign_id, "111");
        assert_eq!(rows[0].sales_7d, 250.0);
    }

    #[tokio::test]
    async fn plain_text_download_falls_back_without_gzip() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("POST"))
            .and(path("/reporting/reports"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"reportId": "rep-2"})),
            )
            .mount(&server)
            .await;

        let download_url = format!("{}/download/rep-2", server.uri());
        Mock::given(method("GET"))
            .and(path("/reporting/reports/rep-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"status": "COMPLETED", "url": download_url}),
            ))
            .mount(&server)
            .await;

        // Uncompressed JSON, as some upstream configurations return.
        Mock::given(method("GET"))
            .and(path("/download/rep-2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(report_rows().to_string()))
            .mount(&server)
            .await;

        let client = fast_client(&server);
        let range = DateRange::new("2026-08-08", "2026-08-14");
        let rows = client.campaign_report(&range).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].impressions, 1000);
    }

    #[tokio::test]
    async fn failed_report_raises_immediately_without_retry() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("POST"))
            .and(path("/reporting/reports"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"reportId": "rep-3"})),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/reporting/reports/rep-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"status": "FAILURE", "failureReason": "invalid column"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = fast_client(&server);
        let range = DateRange::new("2026-08-08", "2026-08-14");
        let err = client.campaign_report(&range).await.unwrap_err();
        match err {
            AdpilotError::ReportFailed { reason } => assert_eq!(reason, "invalid column"),
            other => panic!("expected ReportFailed, got: {other}"),
        }
    }

    #[tokio::test]
    async fn poll_loop_times_out_at_attempt_sixty() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("POST"))
            .and(path("/reporting/reports"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"reportId": "rep-4"})),
            )
            .mount(&server)
            .await;

        // Never terminal: exactly 60 polls, never a 61st.
        Mock::given(method("GET"))
            .and(path("/reporting/reports/rep-4"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "PROCESSING"})),
            )
            .expect(60)
            .mount(&server)
            .await;

        let client = fast_client(&server);
        let range = DateRange::new("2026-08-08", "2026-08-14");
        let err = client.campaign_report(&range).await.unwrap_err();
        match err {
            AdpilotError::ReportTimeout { report_id, attempts } => {
                assert_eq!(report_id, "rep-4");
                assert_eq!(attempts, 60);
            }
            other => panic!("expected ReportTimeout, got: {other}"),
        }
    }

    #[tokio::test]
    async fn submit_error_carries_status_and_body() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("POST"))
            .and(path("/reporting/reports"))
            .respond_with(ResponseTemplate::new(425).set_body_string("too early"))
            .mount(&server)
            .await;

        let client = fast_client(&server);
        let range = DateRange::new("2026-08-08", "2026-08-14");
        let err = client.campaign_report(&range).await.unwrap_err();
        match err {
            AdpilotError::Upstream { status, body } => {
                assert_eq!(status, 425);
                assert_eq!(body, "too early");
            }
            other => panic!("expected Upstream, got: {other}"),
        }
    }

    #[test]
    fn decode_handles_gzip_and_plain() {
        let payload = br#"[{"campaignId":"1"}]"#;
        assert_eq!(decode_report_body(&gzip(payload)), String::from_utf8_lossy(payload));
        assert_eq!(decode_report_body(payload), String::from_utf8_lossy(payload));
    }
}

use petstore_client::{ApiClient, DateFormat, HttpBasicAuth, MultiValueMap, OAuth, parse_time_zone};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .pretty()
        .init();

    // Shared base configuration
    let base = ApiClient::builder()
        .base_path("http://localhost:8080/v2")
        .default_headers(
            MultiValueMap::new()
                .add("User-Agent", "petstore-demo")
                .add("Accept", "application/json"),
        )?;

    // Two clients derived from the same base
    let basic = base
        .basic_auth(HttpBasicAuth::new("my-username", "my-password"))?
        .build();
    let oauth = base
        .oauth(OAuth::new("my-access-token"))?
        .date_format(DateFormat::rfc3339().with_time_zone(parse_time_zone("GMT+10")?))
        .debugging(true)
        .build();

    for client in [&basic, &oauth] {
        let params = client.auth_params(&["http_basic_test", "petstore_auth"])?;
        let headers = client.default_headers().to_header_map();
        info!(
            base_path = client.base_path(),
            debugging = client.is_debugging(),
            default_headers = headers.len(),
            auth_headers = params.headers.len(),
            "client configured"
        );

        let date = client.parse_date("2015-11-07T03:49:09.356Z")?;
        info!(formatted = %client.format_date(&date), "date in client time zone");
    }

    Ok(())
}

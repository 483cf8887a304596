//! Usage: Fixed informational pages (home, terms of service, privacy policy).

use axum::response::Html;

const HOME_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Follower Gateway</title></head>
<body>
  <h1>Welcome to Follower Gateway</h1>
  <p>This app reads the follower count of a TikTok account after you authorize it.</p>
  <ul>
    <li><a href="/authorize">Authorize with TikTok</a></li>
    <li><a href="/follower_count">Show follower count</a></li>
    <li><a href="/refresh_token">Refresh access token</a></li>
    <li><a href="/TOS">Terms of Service</a></li>
    <li><a href="/privacy">Privacy Policy</a></li>
  </ul>
</body>
</html>
"#;

const TOS_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Terms of Service</title></head>
<body>
  <h1>Terms of Service</h1>
  <p>This service is provided as-is for displaying public follower statistics.</p>
  <p>By authorizing the app you allow it to read basic profile information and statistics
     of your TikTok account. You can revoke access at any time from your TikTok settings.</p>
  <p><a href="/">Back</a></p>
</body>
</html>
"#;

const PRIVACY_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Privacy Policy</title></head>
<body>
  <h1>Privacy Policy</h1>
  <p>Access tokens are kept in memory only and are discarded when the server stops.</p>
  <p>No personal data is stored, sold, or shared with third parties.</p>
  <p><a href="/">Back</a></p>
</body>
</html>
"#;

pub(crate) async fn home() -> Html<&'static str> {
    Html(HOME_HTML)
}

pub(crate) async fn terms_of_service() -> Html<&'static str> {
    Html(TOS_HTML)
}

pub(crate) async fn privacy_policy() -> Html<&'static str> {
    Html(PRIVACY_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_links_every_route() {
        for path in ["/authorize", "/follower_count", "/refresh_token", "/TOS", "/privacy"] {
            assert!(HOME_HTML.contains(&format!("href=\"{path}\"")), "missing {path}");
        }
    }
}

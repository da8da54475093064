use axum::response::{Html, Json};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Empathy Engine</title>
</head>
<body>
  <h1>Empathy Engine</h1>
  <form id="speak" method="post" action="/">
    <textarea name="text" rows="5" cols="60" placeholder="Type something to say"></textarea>
    <br>
    <button type="submit">Speak</button>
  </form>
  <p id="result"></p>
  <audio id="player" controls hidden></audio>
  <script>
    document.getElementById("speak").addEventListener("submit", async (event) => {
      event.preventDefault();
      const body = new URLSearchParams(new FormData(event.target));
      const response = await fetch("/", { method: "POST", body });
      const data = await response.json();
      const result = document.getElementById("result");
      if (!response.ok) {
        result.textContent = data.error;
        return;
      }
      result.textContent = `${data.emotion.toUpperCase()} (${data.confidence.toFixed(2)})`;
      const player = document.getElementById("player");
      player.src = data.audio_url;
      player.hidden = false;
      player.play();
    });
  </script>
</body>
</html>
"#;

/// Minimal form for trying the engine from a browser
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

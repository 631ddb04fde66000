//! The embedded single-page UI.
//!
//! One static HTML page: the prediction form with the same defaults as the
//! reference UI, the chart panels fed by the `/api/*` endpoints, and the
//! HouseBot chat box. No templating; the page is a faithful rendering
//! surface and all behavior lives behind the JSON API.

/// The form page served at `/`.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>California House Price Prediction</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 0; background: #0e1117; color: #eee; }
  main { max-width: 860px; margin: 0 auto; padding: 24px; }
  h1 { text-align: center; }
  fieldset { border: 1px solid #333; border-radius: 8px; margin-bottom: 16px; }
  label { display: inline-block; width: 220px; margin: 6px 0; }
  input, select { background: #1b2130; color: #eee; border: 1px solid #3b82f6; border-radius: 6px; padding: 6px; width: 160px; }
  button { background: #3b82f6; color: #fff; border: 1px solid #1f51ff; border-radius: 12px; padding: 10px 24px; font-size: 16px; font-weight: 600; cursor: pointer; }
  button:hover { background: #1f51ff; }
  #result { font-size: 20px; margin: 16px 0; min-height: 28px; }
  #result.error { color: #f87171; }
  .panel { border: 1px solid #333; border-radius: 8px; padding: 12px; margin-bottom: 16px; }
  pre { overflow-x: auto; }
  #chat-log { max-height: 240px; overflow-y: auto; }
  #chat-log p { margin: 4px 0; }
</style>
</head>
<body>
<main>
  <h1>&#127968; California House Price Prediction</h1>

  <fieldset>
    <legend>Enter the house details below and click Predict.</legend>
    <div><label for="longitude">Longitude</label><input id="longitude" type="number" step="any" value="-120"></div>
    <div><label for="latitude">Latitude</label><input id="latitude" type="number" step="any" value="35"></div>
    <div><label for="housing_median_age">Housing Median Age</label><input id="housing_median_age" type="number" step="any" value="20"></div>
    <div><label for="total_rooms">Total Rooms (in Block)</label><input id="total_rooms" type="number" step="any" value="1000"></div>
    <div><label for="total_bedrooms">Total Bedrooms (in Block)</label><input id="total_bedrooms" type="number" step="any" value="200"></div>
    <div><label for="population">Population (in Block)</label><input id="population" type="number" step="any" value="800"></div>
    <div><label for="households">Households (in Block)</label><input id="households" type="number" step="any" value="300"></div>
    <div><label for="median_income">Median Income (in Block)</label><input id="median_income" type="number" step="any" value="4"></div>
    <div><label for="ocean_proximity">Ocean Proximity</label>
      <select id="ocean_proximity">
        <option>&lt;1H OCEAN</option>
        <option>INLAND</option>
        <option>ISLAND</option>
        <option>NEAR BAY</option>
        <option>NEAR OCEAN</option>
      </select>
    </div>
    <p><button id="predict">&#128302; Predict Price</button></p>
    <div id="result"></div>
  </fieldset>

  <div class="panel"><h3>&#128202; Dataset</h3><pre id="stats">loading&hellip;</pre></div>
  <div class="panel"><h3>&#128176; Price Distribution</h3><pre id="histogram"></pre></div>
  <div class="panel"><h3>&#128293; Correlation Heatmap</h3><pre id="correlation"></pre></div>
  <div class="panel"><h3>&#128200; Population vs Price</h3><pre id="scatter"></pre></div>
  <div class="panel"><h3>&#128506;&#65039; Geographic Map</h3><pre id="map"></pre></div>

  <div class="panel">
    <h3>&#128172; HouseBot &mdash; Real Estate Assistant</h3>
    <div id="chat-log"></div>
    <input id="chat-input" placeholder="Ask something...">
    <button id="chat-send">Send</button>
  </div>
</main>
<script>
const fields = ["longitude","latitude","housing_median_age","total_rooms","total_bedrooms","population","households","median_income"];
let sessionId = null;

async function post(url, body) {
  const res = await fetch(url, { method: "POST", headers: { "Content-Type": "application/json" }, body: JSON.stringify(body) });
  const data = await res.json();
  if (!res.ok) throw new Error(data.error || res.statusText);
  return data;
}

document.getElementById("predict").onclick = async () => {
  const result = document.getElementById("result");
  const body = { ocean_proximity: document.getElementById("ocean_proximity").value };
  for (const f of fields) body[f] = Number(document.getElementById(f).value);
  try {
    const data = await post("/api/predict", body);
    result.className = "";
    result.textContent = "\u{1F3E1} Estimated House Price: " + data.formatted;
  } catch (err) {
    result.className = "error";
    result.textContent = err.message;
  }
};

document.getElementById("chat-send").onclick = async () => {
  const input = document.getElementById("chat-input");
  const log = document.getElementById("chat-log");
  const text = input.value.trim();
  if (!text) return;
  input.value = "";
  log.insertAdjacentHTML("beforeend", "<p><b>\u{1F9D1} You:</b> " + text + "</p>");
  try {
    if (!sessionId) sessionId = (await post("/api/session", {})).session_id;
    const data = await post("/api/chat", { session_id: sessionId, message: text });
    log.insertAdjacentHTML("beforeend", "<p><b>\u{1F916} Bot:</b> " + data.reply + "</p>");
  } catch (err) {
    log.insertAdjacentHTML("beforeend", "<p><b>\u{1F916} Bot:</b> " + err.message + "</p>");
  }
  log.scrollTop = log.scrollHeight;
};

(async () => {
  try {
    const stats = await (await fetch("/api/stats")).json();
    document.getElementById("stats").textContent = JSON.stringify(stats.summaries, null, 1);
    const hist = await (await fetch("/api/histogram")).json();
    document.getElementById("histogram").textContent = JSON.stringify(hist.counts);
    const corr = await (await fetch("/api/correlation")).json();
    document.getElementById("correlation").textContent =
      corr.values.map(row => row.map(v => v.toFixed(2)).join(" ")).join("\n");
    const scatter = await (await fetch("/api/scatter?max_points=50")).json();
    document.getElementById("scatter").textContent =
      scatter.map(p => p.population + "\t" + p.median_house_value).join("\n");
    const map = await (await fetch("/api/map?max_points=50")).json();
    document.getElementById("map").textContent =
      map.map(p => p.lat + ", " + p.lon).join("\n");
  } catch (err) { /* panels are optional */ }
})();
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_wires_every_panel_endpoint() {
        for endpoint in [
            "/api/predict",
            "/api/stats",
            "/api/histogram",
            "/api/correlation",
            "/api/scatter",
            "/api/map",
            "/api/session",
            "/api/chat",
        ] {
            assert!(INDEX_HTML.contains(endpoint), "page never calls {endpoint}");
        }
    }

    #[test]
    fn form_defaults_match_the_reference_ui() {
        for default in [
            r#"id="longitude" type="number" step="any" value="-120""#,
            r#"id="median_income" type="number" step="any" value="4""#,
        ] {
            assert!(INDEX_HTML.contains(default));
        }
        assert!(INDEX_HTML.contains("NEAR OCEAN"));
    }
}

//! Minimal server-rendered pages for the chat room.
//!
//! Two static templates with string interpolation — no template engine,
//! the UI is a thin shell over the WebSocket protocol.

/// Escapes text for safe interpolation into HTML.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders the login form, with an optional error banner.
pub fn login_page(error: Option<&str>) -> String {
    let banner = match error {
        Some(msg) => format!(r#"<p class="error">{}</p>"#, escape(msg)),
        None => String::new(),
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>ChatHub — login</title>
<style>
body {{ font-family: sans-serif; max-width: 24rem; margin: 4rem auto; }}
.error {{ color: #b00; }}
input {{ padding: 0.4rem; }}
</style>
</head>
<body>
<h1>ChatHub</h1>
{banner}
<form method="post" action="/login">
  <input name="user" placeholder="username" autofocus maxlength="32">
  <button type="submit">Join</button>
</form>
</body>
</html>
"#
    )
}

/// Renders the chat page for a logged-in user.
pub fn chat_page(username: &str) -> String {
    let user = escape(username);
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>ChatHub</title>
<style>
body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }}
#log {{ height: 24rem; overflow-y: scroll; border: 1px solid #ccc; padding: 0.5rem; }}
#log div {{ margin: 0.1rem 0; }}
form {{ display: flex; gap: 0.5rem; margin-top: 0.5rem; }}
input {{ flex: 1; padding: 0.4rem; }}
</style>
</head>
<body>
<h1>ChatHub</h1>
<p>Logged in as <b>{user}</b> — <a href="/logout">leave</a></p>
<div id="log"></div>
<form id="composer">
  <input id="message" placeholder="say something" autocomplete="off" autofocus>
  <button type="submit">Send</button>
</form>
<script>
const log = document.getElementById("log");
function show(line) {{
  const div = document.createElement("div");
  div.textContent = line;
  log.appendChild(div);
  log.scrollTop = log.scrollHeight;
}}
const proto = location.protocol === "https:" ? "wss:" : "ws:";
const ws = new WebSocket(proto + "//" + location.host + "/ws");
ws.onopen = () => ws.send(JSON.stringify({{ type: "get_history" }}));
ws.onmessage = (ev) => {{
  const msg = JSON.parse(ev.data);
  if (msg.type === "new_message") show(msg.message);
  else if (msg.type === "history") msg.messages.forEach(show);
}};
document.getElementById("composer").addEventListener("submit", (ev) => {{
  ev.preventDefault();
  const input = document.getElementById("message");
  if (input.value.trim()) {{
    ws.send(JSON.stringify({{ type: "send_message", message: input.value }}));
    input.value = "";
  }}
}});
</script>
</body>
</html>
"#
    )
}

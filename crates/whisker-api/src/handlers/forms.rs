//! HTML forms for browser use.

use axum::response::Html;

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Whisker - cat detection</title></head>
<body>
  <h1>Is it a cat?</h1>
  <form action="/upload" method="post" enctype="multipart/form-data">
    <p><label>Photo <input type="file" name="image" accept=".png,.jpg,.jpeg" required></label></p>
    <p><label>Cat name <input type="text" name="name"></label></p>
    <p><label>Your email <input type="email" name="email"></label></p>
    <p><button type="submit">Detect</button></p>
  </form>
  <p><a href="/register">Register a known cat</a> | <a href="/chats">Registered cats</a></p>
</body>
</html>
"#;

const REGISTER_HTML: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Whisker - register a cat</title></head>
<body>
  <h1>Register a cat</h1>
  <form action="/register" method="post" enctype="multipart/form-data">
    <p><label>Photo <input type="file" name="image" accept=".png,.jpg,.jpeg" required></label></p>
    <p><label>Cat name <input type="text" name="chat_name"></label></p>
    <p><label>Owner email <input type="email" name="owner_email"></label></p>
    <p><button type="submit">Register</button></p>
  </form>
  <p><a href="/">Back</a></p>
</body>
</html>
"#;

/// Upload form
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Register-existing form
pub async fn register_form() -> Html<&'static str> {
    Html(REGISTER_HTML)
}

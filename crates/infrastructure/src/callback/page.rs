//! Page shown in the browser after the redirect.

pub const SUCCESS_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>pokcli</title>
<style>
body { font-family: sans-serif; background: #f4f4f4; color: #333; }
main {
  max-width: 32rem;
  margin: 10vh auto;
  padding: 2rem;
  background: #fff;
  border-radius: 8px;
  text-align: center;
}
h1 { color: #ef4056; }
</style>
</head>
<body>
<main>
<h1>Success!</h1>
<p>You are authenticated, you can now close this window and return to the CLI.</p>
</main>
</body>
</html>
"#;

//! Server-rendered HTML pages
//!
//! The UI is a handful of small pages rendered from plain functions
//! around a shared shell. All interpolated user data goes through
//! `escape_html`.

const STYLE: &str = "\
body{font-family:sans-serif;max-width:720px;margin:2rem auto;padding:0 1rem;color:#223}\
nav{margin-bottom:1.5rem}nav a{margin-right:1rem;color:#2f6f3e;text-decoration:none}\
h1,h2{color:#2f6f3e}form{margin:1rem 0}label{display:block;margin:.5rem 0 .2rem}\
input{padding:.4rem;width:100%;max-width:20rem}button{margin-top:.8rem;padding:.5rem 1.2rem;\
background:#2f6f3e;color:#fff;border:0;cursor:pointer}\
.grid{display:grid;grid-template-columns:repeat(2,minmax(0,1fr));gap:0 1rem}\
.message{padding:.6rem;margin:.8rem 0;background:#eef5ee;border-left:4px solid #2f6f3e}\
.error{background:#f8ecec;border-left-color:#a33}";

/// Escape text for interpolation into HTML
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap page content in the shared shell
fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - Agro Advisor</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Home</a><a href=\"/about\">About</a><a href=\"/dashboard\">Dashboard</a>\
         <a href=\"/register\">Register</a><a href=\"/login\">Login</a></nav>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn message_block(class: &str, text: &str) -> String {
    format!("<p class=\"{class}\">{}</p>\n", escape_html(text))
}

/// Context for the home page result panels
#[derive(Debug, Default)]
pub struct HomeContext {
    pub weather_text: Option<String>,
    pub prediction_text: Option<String>,
    pub fertilizer_text: Option<String>,
}

/// Home page: weather lookup and crop prediction forms
pub fn home_page(ctx: &HomeContext) -> String {
    let mut body = String::from("<h1>Agro Advisor</h1>\n");

    body.push_str("<h2>Weather</h2>\n<form method=\"post\" action=\"/get_weather\">\n");
    body.push_str("<label for=\"city\">City</label><input id=\"city\" name=\"city\">\n");
    body.push_str("<button type=\"submit\">Get Weather</button>\n</form>\n");
    if let Some(text) = &ctx.weather_text {
        body.push_str(&message_block("message", text));
    }

    body.push_str("<h2>Crop Recommendation</h2>\n<form method=\"post\" action=\"/predict\">\n<div class=\"grid\">\n");
    let fields = [
        ("N", "Nitrogen (N)"),
        ("P", "Phosphorus (P)"),
        ("K", "Potassium (K)"),
        ("temperature", "Temperature (°C)"),
        ("humidity", "Humidity (%)"),
        ("ph", "Soil pH"),
        ("rainfall", "Rainfall (mm)"),
    ];
    for (name, label) in fields {
        body.push_str(&format!(
            "<div><label for=\"{name}\">{label}</label><input id=\"{name}\" name=\"{name}\"></div>\n"
        ));
    }
    body.push_str("</div>\n<button type=\"submit\">Predict Crop</button>\n</form>\n");
    if let Some(text) = &ctx.prediction_text {
        body.push_str(&message_block("message", text));
    }
    if let Some(text) = &ctx.fertilizer_text {
        body.push_str(&message_block("message", text));
    }

    layout("Home", &body)
}

/// About page
pub fn about_page() -> String {
    let body = "<h1>About</h1>\n\
        <p>Agro Advisor helps farmers pick a crop for their soil and\n\
        climate. Enter seven soil and climate measurements to get a crop\n\
        recommendation with a matching fertilizer tip, or look up the\n\
        current weather for your city.</p>\n";
    layout("About", body)
}

/// Registration page, optionally with an inline error or success message
pub fn register_page(error: Option<&str>, success: Option<&str>) -> String {
    let mut body = String::from("<h1>Register</h1>\n");
    if let Some(text) = error {
        body.push_str(&message_block("message error", text));
    }
    if let Some(text) = success {
        body.push_str(&message_block("message", text));
    }
    body.push_str(
        "<form method=\"post\" action=\"/register\">\n\
         <label for=\"name\">Name</label><input id=\"name\" name=\"name\">\n\
         <label for=\"email\">Email</label><input id=\"email\" name=\"email\" type=\"email\">\n\
         <label for=\"password\">Password</label><input id=\"password\" name=\"password\" type=\"password\">\n\
         <button type=\"submit\">Register</button>\n</form>\n",
    );
    layout("Register", &body)
}

/// Login page, optionally with an inline error message
pub fn login_page(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Login</h1>\n");
    if let Some(text) = error {
        body.push_str(&message_block("message error", text));
    }
    body.push_str(
        "<form method=\"post\" action=\"/login\">\n\
         <label for=\"email\">Email</label><input id=\"email\" name=\"email\" type=\"email\">\n\
         <label for=\"password\">Password</label><input id=\"password\" name=\"password\" type=\"password\">\n\
         <button type=\"submit\">Login</button>\n</form>\n",
    );
    layout("Login", &body)
}

/// Dashboard page for a logged-in farmer
pub fn dashboard_page(name: &str) -> String {
    let body = format!(
        "<h1>Dashboard</h1>\n<p>Welcome, {}!</p>\n\
         <p><a href=\"/\">Check weather or get a crop recommendation</a></p>\n\
         <p><a href=\"/logout\">Logout</a></p>\n",
        escape_html(name)
    );
    layout("Dashboard", &body)
}

/// Bare message page, used as the error fallback
pub fn message_page(message: &str) -> String {
    layout("Agro Advisor", &message_block("message error", message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & b \"c\""), "a &amp; b &quot;c&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_home_page_has_both_forms() {
        let page = home_page(&HomeContext::default());
        assert!(page.contains("action=\"/get_weather\""));
        assert!(page.contains("action=\"/predict\""));
        for field in ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"] {
            assert!(page.contains(&format!("name=\"{field}\"")), "field: {field}");
        }
    }

    #[test]
    fn test_dashboard_escapes_the_farmer_name() {
        let page = dashboard_page("<b>Ravi</b>");
        assert!(page.contains("&lt;b&gt;Ravi&lt;/b&gt;"));
        assert!(!page.contains("<b>Ravi</b>"));
    }

    #[test]
    fn test_register_page_shows_inline_messages() {
        let page = register_page(Some("Email already exists!"), None);
        assert!(page.contains("Email already exists!"));

        let page = register_page(None, Some("Successfully registered! Please log in."));
        assert!(page.contains("Successfully registered! Please log in."));
    }
}

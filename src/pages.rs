//! HTML pages served by the site.
//!
//! Pages are plain strings wrapped in a shared layout. Anything that came
//! from the visitor goes through [`escape_html`] before it is interpolated.

use axum::{http::StatusCode, response::Html};

const SITE_TITLE: &str = "Rocket Academia";

/// Escapes the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | {site}</title>
    <link rel="stylesheet" type="text/css" href="/static/css/style.css">
</head>
<body>
    <header>
        <a class="brand" href="/">{site}</a>
    </header>
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape_html(title),
        site = SITE_TITLE,
        body = body,
    ))
}

/// GET /
pub fn landing() -> Html<String> {
    layout(
        "Inicio",
        r#"        <section class="hero">
            <h1>Aprende a programar con Rocket Academia</h1>
            <p>Cursos en vivo, proyectos reales y mentores que te acompañan.</p>
            <a class="button" href="/descuento">Quiero mi descuento</a>
        </section>"#,
    )
}

/// GET /descuento and GET /obtener/descuento
pub fn discount_offer() -> Html<String> {
    layout(
        "Descuento",
        r#"        <section class="offer">
            <h1>Obtén tu cupón de descuento</h1>
            <p>Déjanos tus datos y te entregamos un cupón para tu primera inscripción.</p>
            <form method="post" action="/obtener/descuento">
                <label for="nombre">Nombre</label>
                <input type="text" id="nombre" name="nombre">
                <label for="correo">Correo</label>
                <input type="email" id="correo" name="correo">
                <label for="telefono">Teléfono</label>
                <input type="tel" id="telefono" name="telefono">
                <button type="submit">Obtener descuento</button>
            </form>
        </section>"#,
    )
}

/// GET /cupon, and the confirmation page after a successful signup.
pub fn coupon(name: Option<&str>) -> Html<String> {
    let greeting = match name {
        Some(name) if !name.trim().is_empty() => {
            format!("<h1>¡Felicidades, {}!</h1>", escape_html(name))
        }
        _ => "<h1>¡Felicidades!</h1>".to_string(),
    };

    layout(
        "Cupón",
        &format!(
            r#"        <section class="coupon">
            {greeting}
            <p>Presenta este cupón al momento de inscribirte para recibir tu descuento.</p>
            <div class="coupon-code">ROCKET-DESCUENTO</div>
        </section>"#
        ),
    )
}

/// Shown when the email already has enough leads on record.
pub fn coupon_already_claimed(email: Option<&str>) -> Html<String> {
    let email = email.map(escape_html).unwrap_or_default();

    layout(
        "Cupón existente",
        &format!(
            r#"        <section class="coupon-existing">
            <h1>Ya tienes un cupón</h1>
            <p>El correo <strong>{email}</strong> ya está registrado en nuestra promoción.</p>
            <a class="button" href="/">Volver al inicio</a>
        </section>"#
        ),
    )
}

/// Generic failure page. Never carries error details.
pub fn error_page(status: StatusCode) -> Html<String> {
    layout(
        "Error",
        &format!(
            r#"        <section class="error">
            <h1>Algo salió mal</h1>
            <p>No pudimos procesar tu solicitud ({}). Intenta nuevamente más tarde.</p>
        </section>"#,
            status.as_u16()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Ana"), "Ana");
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("O'Brien & Co"), "O&#x27;Brien &amp; Co");
    }

    #[test]
    fn test_discount_form_posts_expected_fields() {
        let Html(page) = discount_offer();
        assert!(page.contains(r#"action="/obtener/descuento""#));
        for field in ["nombre", "correo", "telefono"] {
            assert!(page.contains(&format!(r#"name="{}""#, field)));
        }
    }

    #[test]
    fn test_coupon_greets_by_name() {
        let Html(page) = coupon(Some("Ana"));
        assert!(page.contains("¡Felicidades, Ana!"));

        let Html(anonymous) = coupon(None);
        assert!(anonymous.contains("¡Felicidades!"));
    }

    #[test]
    fn test_user_values_are_escaped() {
        let Html(page) = coupon(Some("<b>Ana</b>"));
        assert!(!page.contains("<b>Ana</b>"));
        assert!(page.contains("&lt;b&gt;Ana&lt;/b&gt;"));

        let Html(page) = coupon_already_claimed(Some("\"><img src=x>"));
        assert!(!page.contains("<img src=x>"));
    }

    #[test]
    fn test_already_claimed_shows_email() {
        let Html(page) = coupon_already_claimed(Some("ana@example.com"));
        assert!(page.contains("ana@example.com"));
    }

    #[test]
    fn test_error_page_has_status_only() {
        let Html(page) = error_page(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(page.contains("500"));
    }
}

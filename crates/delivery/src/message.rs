//! Localized inquiry email content.
//!
//! Produces both a plain-text and an HTML body. Every visitor-supplied value
//! is HTML-escaped before it goes into the HTML part.

use lana_core::dates::format_iso_date;
use lana_core::inquiry::Inquiry;
use lana_core::locale::Locale;
use uuid::Uuid;

/// Rendered email, independent of any transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

struct Labels {
    heading: &'static str,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    guests: &'static str,
    check_in: &'static str,
    check_out: &'static str,
    nights: &'static str,
    message: &'static str,
    reference: &'static str,
    footer: &'static str,
}

const HR_LABELS: Labels = Labels {
    heading: "Nova rezervacijska upit",
    name: "Ime",
    email: "Email",
    phone: "Telefon",
    guests: "Broj osoba",
    check_in: "Dolazak",
    check_out: "Odlazak",
    nights: "Broj noćenja",
    message: "Poruka",
    reference: "Referenca",
    footer: "Ovaj email je poslan iz kontakt forme na web stranici Mobilne kućice Lana.",
};

const EN_LABELS: Labels = Labels {
    heading: "New Booking Inquiry",
    name: "Name",
    email: "Email",
    phone: "Phone",
    guests: "Number of Guests",
    check_in: "Check-in",
    check_out: "Check-out",
    nights: "Nights",
    message: "Message",
    reference: "Reference",
    footer: "This email was sent from the contact form on Mobile Home Lana website.",
};

fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::Hr => &HR_LABELS,
        Locale::En => &EN_LABELS,
    }
}

/// Render the operator notification for `inquiry` in `locale`.
pub fn render_inquiry_email(inquiry: &Inquiry, locale: Locale, reference: Uuid) -> InquiryEmail {
    let l = labels(locale);
    let check_in = format!(
        "{} ({})",
        locale.format_date(inquiry.check_in),
        format_iso_date(inquiry.check_in)
    );
    let check_out = format!(
        "{} ({})",
        locale.format_date(inquiry.check_out),
        format_iso_date(inquiry.check_out)
    );

    let rows: Vec<(&str, String)> = vec![
        (l.name, inquiry.name.clone()),
        (l.email, inquiry.email.clone()),
        (l.phone, inquiry.phone.clone()),
        (l.guests, inquiry.guests.to_string()),
        (l.check_in, check_in),
        (l.check_out, check_out),
        (l.nights, inquiry.nights().to_string()),
    ];

    let mut text = format!("{}\n\n", l.heading);
    for (label, value) in &rows {
        text.push_str(&format!("{label}: {value}\n"));
    }
    if let Some(message) = &inquiry.message {
        text.push_str(&format!("\n{}:\n{message}\n", l.message));
    }
    text.push_str(&format!("\n{}: {reference}\n{}\n", l.reference, l.footer));

    let mut html = String::from(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">"#,
    );
    html.push_str(&format!(
        r#"<h2 style="color: #0369a1;">{}</h2>"#,
        l.heading
    ));
    html.push_str(
        r#"<div style="background: #f0f9ff; padding: 20px; border-radius: 8px; margin: 20px 0;">"#,
    );
    for (label, value) in &rows {
        html.push_str(&format!(
            "<p><strong>{label}:</strong> {}</p>",
            escape_html(value)
        ));
    }
    if let Some(message) = &inquiry.message {
        html.push_str(&format!(
            "<p><strong>{}:</strong><br/>{}</p>",
            l.message,
            escape_html(message).replace('\n', "<br/>")
        ));
    }
    html.push_str("</div>");
    html.push_str(&format!(
        r#"<p style="color: #64748b; font-size: 12px;">{}<br/>{}: {reference}</p>"#,
        l.footer, l.reference
    ));
    html.push_str("</div>");

    InquiryEmail {
        subject: format!("{} - {}", l.heading, inquiry.name),
        text,
        html,
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

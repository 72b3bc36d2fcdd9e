// HTML bodies for the two contact-form emails. Inline styles only, since
// mail clients strip stylesheets. Everything user-supplied goes through
// escape_html before landing in markup.

pub fn auto_reply_html(first_name: &str, sender_name: &str) -> String {
    let first_name = escape_html(first_name);
    let sender_name = escape_html(sender_name);
    format!(
        r#"<div style="background-color:#f9fafb;font-family:sans-serif;padding:32px 16px">
  <div style="margin:0 auto;max-width:600px;background-color:#ffffff;border-radius:8px;border:1px solid #e5e7eb;padding:32px">
    <h1 style="font-size:24px;font-weight:600;color:#111827;margin-bottom:16px">Hi {first_name},</h1>
    <p style="color:#374151;font-size:16px;line-height:1.6;margin-bottom:16px">
      Thank you for reaching out! I've received your message and truly
      appreciate you taking the time to connect with me.
    </p>
    <p style="color:#374151;font-size:16px;line-height:1.6;margin-bottom:24px">
      I review all messages personally and will get back to you within
      <strong style="color:#111827">24-48 hours</strong>.
    </p>
    <div style="border-top:1px solid #e5e7eb;padding-top:16px">
      <p style="color:#111827;font-weight:600;font-size:16px;margin-bottom:4px">Best regards,</p>
      <p style="color:#111827;font-weight:600;font-size:16px;margin:0">{sender_name}</p>
    </div>
  </div>
  <p style="text-align:center;color:#6b7280;font-size:12px;line-height:1.6;margin-top:24px">
    This is an automated response to confirm receipt of your message.
  </p>
</div>"#
    )
}

pub fn contact_notification_html(name: &str, email: &str, message: &str) -> String {
    let name = escape_html(name);
    let email = escape_html(email);
    let message = escape_html(message);
    format!(
        r#"<div style="background-color:#f9fafb;font-family:sans-serif;padding:32px 16px">
  <div style="margin:0 auto;max-width:600px">
    <div style="background-color:#111827;border-radius:8px 8px 0 0;padding:24px 32px;text-align:center">
      <h1 style="color:#ffffff;font-size:24px;font-weight:600;margin:0">New Contact Form Submission</h1>
      <p style="color:#e5e7eb;font-size:14px;margin:8px 0 0 0">Someone reached out through your portfolio website</p>
    </div>
    <div style="background-color:#ffffff;border-radius:0 0 8px 8px;border:1px solid #e5e7eb;border-top:none;padding:32px">
      <div style="background-color:#f9fafb;border-radius:6px;padding:16px;margin-bottom:24px">
        <p style="margin:0 0 12px 0">
          <strong style="color:#111827;font-size:14px">Name:</strong><br>
          <span style="color:#374151;font-size:16px">{name}</span>
        </p>
        <p style="margin:0">
          <strong style="color:#111827;font-size:14px">Email:</strong><br>
          <a href="mailto:{email}" style="color:#2563eb;font-size:16px;text-decoration:none">{email}</a>
        </p>
      </div>
      <p style="color:#6b7280;font-size:12px;font-weight:600;text-transform:uppercase;letter-spacing:0.5px;margin-bottom:8px">Message</p>
      <div style="background-color:#f9fafb;border-radius:6px;padding:16px">
        <p style="color:#374151;font-size:16px;line-height:1.6;margin:0;white-space:pre-wrap">{message}</p>
      </div>
    </div>
  </div>
</div>"#
    )
}

fn escape_html(input: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_user_fields() {
        let html = contact_notification_html(
            "<script>alert(1)</script>",
            "a&b@example.com",
            "hi \"there\"",
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("a&amp;b@example.com"));
        assert!(html.contains("hi &quot;there&quot;"));
    }

    #[test]
    fn auto_reply_greets_by_first_name() {
        let html = auto_reply_html("Ada", "Bryan Palay");
        assert!(html.contains("Hi Ada,"));
        assert!(html.contains("Bryan Palay"));
        assert!(html.contains("24-48 hours"));
    }
}

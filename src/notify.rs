use crate::client::{EmailClient, OutgoingEmail};
use crate::domain::EmailAddress;
use crate::model::Message;

/// Best-effort owner notification for newly stored messages.
///
/// Channels are tried in order and the pipeline stops at the first success.
/// Channel 1 is a direct send through the email API; channel 2 records the
/// intent in the log so the owner can recover it, without delivering
/// anything itself. Neither outcome ever reaches the submitting caller.
pub struct Notifier {
    email_client: EmailClient,
    owner: EmailAddress,
}

impl Notifier {
    pub fn new(email_client: EmailClient, owner: EmailAddress) -> Self {
        Self {
            email_client,
            owner,
        }
    }

    #[tracing::instrument(name = "Notify owner of new message", skip(self, message))]
    pub async fn notify(&self, message: &Message) {
        let email = OutgoingEmail {
            subject: format!("New Portfolio Message from {}", message.name),
            html_body: render_html(message),
            text_body: render_text(message),
        };

        match self.email_client.send(&self.owner, &email).await {
            Ok(()) => {
                tracing::info!("Notification email sent to {}", self.owner);
            }
            Err(error) => {
                // Fallback channel: log what would have been sent, to whom,
                // and why the direct send failed.
                tracing::warn!(
                    error.cause_chain = ?error,
                    to = %self.owner,
                    reply_to = %message.email,
                    subject = %email.subject,
                    "Email delivery failed; notification recorded in log only"
                );
            }
        }
    }
}

fn render_html(message: &Message) -> String {
    // Field values were HTML-escaped at validation, safe to interpolate.
    format!(
        "<html>\
         <body>\
         <h2>New Message from Your Portfolio</h2>\
         <p><strong>Name:</strong> {name}</p>\
         <p><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></p>\
         <p><strong>Subject:</strong> {subject}</p>\
         <p><strong>Message:</strong></p>\
         <blockquote>{body}</blockquote>\
         <p><small>Received: {date}</small></p>\
         </body>\
         </html>",
        name = message.name,
        email = message.email,
        subject = message.subject,
        body = message.message,
        date = message.date,
    )
}

fn render_text(message: &Message) -> String {
    format!(
        "New message from your portfolio\n\n\
         Name: {}\n\
         Email: {}\n\
         Subject: {}\n\n\
         {}\n\n\
         Received: {}\n",
        message.name, message.email, message.subject, message.message, message.date,
    )
}

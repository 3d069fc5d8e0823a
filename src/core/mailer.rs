use crate::config::MailConfig;
use crate::core::{EmailMessage, MailTransport};
use crate::utils::error::Result;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::path::{Path, PathBuf};

/// 找出目錄下（不遞迴）所有 CSV 檔，排序讓附件順序可預期
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("*.csv");

    let mut paths = glob::glob(&pattern.to_string_lossy())?.collect::<std::result::Result<
        Vec<PathBuf>,
        glob::GlobError,
    >>()?;

    paths.sort();

    Ok(paths)
}

pub struct Mailer<T: MailTransport> {
    transport: T,
    config: MailConfig,
}

impl<T: MailTransport> Mailer<T> {
    pub fn new(transport: T, config: MailConfig) -> Self {
        Self { transport, config }
    }

    /// 固定收件人與回覆地址，主旨和內文都帶上論壇的 base URL
    pub fn build_message(&self, csv_paths: Vec<PathBuf>) -> EmailMessage {
        EmailMessage {
            to: self.config.email_to.clone(),
            reply_to: self.config.email_reply_to.clone(),
            subject: format!(
                "[Forum Statistics] Monthly stats for {}",
                self.config.base_url
            ),
            body: format!(
                "Find the last months usage stats for {} attached",
                self.config.base_url
            ),
            attachments: csv_paths,
        }
    }

    /// 零個 CSV 不是錯誤：照樣寄出一封沒有附件的信
    pub async fn send_stats(&self, csv_paths: Vec<PathBuf>) -> Result<()> {
        let attachment_count = csv_paths.len();
        let message = self.build_message(csv_paths);

        self.transport.send(&message).await?;

        tracing::info!("mail sent ({} attachment(s))", attachment_count);
        Ok(())
    }

    pub async fn send_directory(&self, input_dir: &Path) -> Result<()> {
        let csv_paths = discover_csv_files(input_dir)?;
        tracing::info!(
            "found {} csv file(s) in {}",
            csv_paths.len(),
            input_dir.display()
        );

        self.send_stats(csv_paths).await
    }
}

/// 經由 SMTP（implicit TLS）送信的正式傳輸。
/// 寄件人地址使用 SMTP 帳號本身。
pub struct SmtpMailTransport {
    host: String,
    username: String,
    password: String,
}

impl SmtpMailTransport {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            host: config.email_host.clone(),
            username: config.email_username.clone(),
            password: config.email_password.clone(),
        }
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let csv_content_type = ContentType::parse("text/csv").unwrap();

        let mut parts = MultiPart::mixed().singlepart(SinglePart::plain(message.body.clone()));

        for path in &message.attachments {
            let content = tokio::fs::read(path).await?;
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            parts = parts.singlepart(Attachment::new(filename).body(content, csv_content_type.clone()));
        }

        let email = Message::builder()
            .from(self.username.parse::<Mailbox>()?)
            .to(message.to.parse::<Mailbox>()?)
            .reply_to(message.reply_to.parse::<Mailbox>()?)
            .subject(message.subject.clone())
            .multipart(parts)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)?
            .credentials(Credentials::new(
                self.username.clone(),
                self.password.clone(),
            ))
            .build();

        transport.send(email).await?;

        Ok(())
    }
}

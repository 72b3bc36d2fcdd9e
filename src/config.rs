use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "portfolio-api")]
#[command(about = "Backend API for the portfolio site")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // GitHub account whose public activity feeds the live widget
    #[arg(short, long, default_value = "bry-ly")]
    pub github_user: String,

    // GitHub API base URL (overridable for testing)
    #[arg(long, default_value = "https://api.github.com")]
    pub github_api_url: String,

    // Email provider base URL (overridable for testing)
    #[arg(long, default_value = "https://api.resend.com")]
    pub email_api_url: String,

    // Email provider API key
    #[arg(long, env = "RESEND_API_KEY", default_value = "", hide_env_values = true)]
    pub email_api_key: String,

    // Display name on the auto-reply
    #[arg(long, env = "EMAIL_SENDER_NAME", default_value = "Bryan Palay")]
    pub email_sender_name: String,

    // Verified sender address
    #[arg(long, env = "EMAIL_SENDER_ADDRESS", default_value = "onboarding@resend.dev")]
    pub email_sender_address: String,

    // Where contact notifications land
    #[arg(long, env = "EMAIL_RECIPIENT", default_value = "bryanpalay119@gmail.com")]
    pub email_recipient: String,

    // Activity feed: max requests per window per caller
    #[arg(long, default_value_t = 30)]
    pub activity_rate_limit: u32,

    // Activity feed window in seconds
    #[arg(long, default_value_t = 60)]
    pub activity_rate_window: u64,

    // Contact form: max emails per window per caller
    #[arg(long, default_value_t = 5)]
    pub send_rate_limit: u32,

    // Contact form window in seconds
    #[arg(long, default_value_t = 3600)]
    pub send_rate_window: u64,
}

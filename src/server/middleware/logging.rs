//! HTTP request logging middleware

/// Create a request logging filter using warp's built-in logging
pub fn with_request_logging() -> warp::filters::log::Log<impl Fn(warp::filters::log::Info) + Clone>
{
    warp::log::custom(|info| {
        let status = info.status();
        let status_icon = match status.as_u16() {
            200..=299 => "✅",
            300..=399 => "🔀",
            400..=499 => "⚠️",
            _ => "❌",
        };

        let remote_addr = info
            .remote_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        println!(
            "{} {} {} {} - {} {}ms - {}",
            status_icon,
            chrono::Local::now().format("%H:%M:%S"),
            info.method(),
            info.path(),
            status,
            info.elapsed().as_millis(),
            remote_addr
        );
    })
}

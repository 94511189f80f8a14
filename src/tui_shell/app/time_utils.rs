use super::*;

fn date_format() -> Option<&'static [FormatItem<'static>]> {
    static FMT: OnceLock<Option<Vec<FormatItem<'static>>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse("[month repr:short] [day padding:none], [year]").ok()
    })
    .as_deref()
}

fn clock_format() -> Option<&'static [FormatItem<'static>]> {
    static FMT: OnceLock<Option<Vec<FormatItem<'static>>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse("[hour padding:zero]:[minute padding:zero]:[second padding:zero]")
            .ok()
    })
    .as_deref()
}

/// `2024-01-02T03:04:05Z` as `Jan 2, 2024`. Unparseable input is shown as-is.
pub(in crate::tui_shell) fn fmt_date(ts: &str) -> String {
    OffsetDateTime::parse(ts, &Rfc3339)
        .ok()
        .and_then(|dt| dt.format(date_format()?).ok())
        .unwrap_or_else(|| ts.to_string())
}

pub(in crate::tui_shell) fn fmt_since(ts: &str, now: OffsetDateTime) -> String {
    let Ok(dt) = OffsetDateTime::parse(ts, &Rfc3339) else {
        return ts.to_string();
    };
    let secs = (now - dt).whole_seconds();

    // Future timestamps are rare; show as absolute.
    if secs < 0 {
        return fmt_date(ts);
    }

    let mins = secs / 60;
    let hours = mins / 60;
    let days = hours / 24;

    if secs < 60 {
        "just now".to_string()
    } else if mins < 60 {
        format!("{}m ago", mins)
    } else if hours < 48 {
        format!("{}h ago", hours)
    } else if days < 14 {
        format!("{}d ago", days)
    } else {
        fmt_date(ts)
    }
}

pub(in crate::tui_shell) fn now_clock() -> String {
    let now = OffsetDateTime::now_utc();
    clock_format()
        .and_then(|f| now.format(f).ok())
        .unwrap_or_else(|| "--:--:--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_like_the_web_ui() {
        assert_eq!(fmt_date("2024-01-02T03:04:05Z"), "Jan 2, 2024");
        assert_eq!(fmt_date("not a date"), "not a date");
    }

    #[test]
    fn recent_timestamps_are_relative() {
        let now = OffsetDateTime::parse("2024-01-02T05:04:05Z", &Rfc3339).unwrap();
        assert_eq!(fmt_since("2024-01-02T03:04:05Z", now), "2h ago");
        assert_eq!(fmt_since("2024-01-02T05:04:00Z", now), "just now");
        assert_eq!(fmt_since("2023-11-02T05:04:00Z", now), "Nov 2, 2023");
    }
}

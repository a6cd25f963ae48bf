use chrono::{NaiveDateTime, Utc};
use colored::Colorize;
use sysmetic::api::{CmdMessage, MessageLevel};
use sysmetic::chart::{format_point_date, DualSeries};
use sysmetic::filters::{render, FilterControl, FilterField, FilterKind};
use sysmetic::model::{
    AdminStrategyRow, CatalogItem, InquiryRow, MemberRow, NoticeRow, QuestionRow,
    StrategySummary,
};
use sysmetic::table::PageState;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TIME_WIDTH: usize = 14;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Cut `s` to `max_width` display columns, marking the cut with `…`.
pub(super) fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// Left-align in `width` display columns; wide (Hangul) glyphs count double.
pub(super) fn cell(s: &str, width: usize) -> String {
    let text = truncate_to_width(s, width);
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn format_time_ago(written: &str) -> String {
    let parsed = NaiveDateTime::parse_from_str(written, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(written, "%Y-%m-%d %H:%M:%S"));
    let Ok(parsed) = parsed else {
        return format!("{:>width$}", written, width = TIME_WIDTH);
    };
    let duration = Utc::now()
        .naive_utc()
        .signed_duration_since(parsed)
        .to_std()
        .unwrap_or_default();
    let time_str = Formatter::new().convert(duration);
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

fn row_number(index: usize) -> String {
    format!("{:>3}. ", index + 1)
}

fn print_empty(rows: usize, what: &str) -> bool {
    if rows == 0 {
        println!("No {} found.", what);
        return true;
    }
    false
}

pub(super) fn print_footer(page: &PageState, total_pages: usize) {
    if total_pages > 1 {
        println!(
            "{}",
            format!(
                "page {}/{} · {} rows",
                page.current + 1,
                total_pages,
                page.total_elements
            )
            .dimmed()
        );
    }
}

pub(super) fn print_strategies(rows: &[StrategySummary]) {
    if print_empty(rows.len(), "strategies") {
        return;
    }
    for (i, s) in rows.iter().enumerate() {
        let rate = format!("{:>8.2}%", s.accumulated_profit_loss_rate);
        let rate = if s.accumulated_profit_loss_rate < 0.0 {
            rate.blue()
        } else {
            rate.red()
        };
        println!(
            "{}{} {} {} {}  MDD {:>8.2}  SM {:>6.2}",
            row_number(i).yellow(),
            cell(&s.name, 28).bold(),
            cell(&s.trader_nickname, 14),
            s.cycle,
            rate,
            s.mdd,
            s.sm_score
        );
        if !s.stock_list.stock_names.is_empty() {
            println!(
                "      {}",
                truncate_to_width(&s.stock_list.stock_names.join(", "), 70).dimmed()
            );
        }
    }
}

pub(super) fn print_catalog(rows: &[CatalogItem]) {
    if print_empty(rows.len(), "items") {
        return;
    }
    for (i, item) in rows.iter().enumerate() {
        println!(
            "{}{} {}",
            row_number(i).yellow(),
            cell(&item.name, 30),
            item.file_path.dimmed()
        );
    }
}

pub(super) fn print_admin_strategies(rows: &[AdminStrategyRow]) {
    if print_empty(rows.len(), "strategies") {
        return;
    }
    for (i, s) in rows.iter().enumerate() {
        let approval = s.approval_status_code.as_str();
        let approval = match approval {
            "APPROVED" => approval.green(),
            "REJECTED" => approval.red(),
            "REQUESTED" => approval.yellow(),
            _ => approval.normal(),
        };
        println!(
            "{}{} {} {:<8} {}  {}",
            row_number(i).yellow(),
            cell(&s.strategy_name, 28).bold(),
            cell(&s.trader_name, 14),
            s.open_status.as_str(),
            approval,
            s.strategy_create_date.dimmed()
        );
    }
}

pub(super) fn print_members(rows: &[MemberRow]) {
    if print_empty(rows.len(), "members") {
        return;
    }
    for (i, m) in rows.iter().enumerate() {
        println!(
            "{}{} {} {} {} {}",
            row_number(i).yellow(),
            cell(&m.email, 28),
            cell(&m.name, 12),
            cell(&m.nickname, 14),
            cell(&m.phone_number, 14),
            m.role_code.as_str().cyan()
        );
    }
}

pub(super) fn print_notices(rows: &[NoticeRow]) {
    if print_empty(rows.len(), "notices") {
        return;
    }
    for (i, n) in rows.iter().enumerate() {
        let visibility = if n.is_open {
            "public".green()
        } else {
            "hidden".dimmed()
        };
        let attachment = if n.file_exists { "📎" } else { "  " };
        println!(
            "{}{} {} {} {:>5} {:<6}{}",
            row_number(i).yellow(),
            cell(&n.notice_title, 36).bold(),
            attachment,
            cell(&n.writer_nickname, 12),
            n.hits,
            visibility,
            format_time_ago(&n.write_date).dimmed()
        );
    }
}

pub(super) fn print_inquiries(rows: &[InquiryRow]) {
    if print_empty(rows.len(), "inquiries") {
        return;
    }
    for (i, q) in rows.iter().enumerate() {
        println!(
            "{}{} {} {} {} {}",
            row_number(i).yellow(),
            cell(&q.inquiry_title, 28).bold(),
            cell(&q.strategy_name, 20),
            cell(&q.inquirer_nickname, 12),
            cell(&q.inquiry_status, 8),
            q.inquiry_registration_date.dimmed()
        );
    }
}

pub(super) fn print_questions(rows: &[QuestionRow]) {
    if print_empty(rows.len(), "questions") {
        return;
    }
    for (i, q) in rows.iter().enumerate() {
        let status = match q.status.as_str() {
            "answered" => q.status.as_str().green(),
            other => other.yellow(),
        };
        println!(
            "{}{} {} {} {}",
            row_number(i).yellow(),
            cell(&q.question_name, 32).bold(),
            cell(&q.strategy_name, 20),
            status,
            q.date.dimmed()
        );
    }
}

pub(super) fn print_fields(fields: &[FilterField]) {
    if fields.is_empty() {
        println!("{}", "No filters on this screen.".dimmed());
        return;
    }
    for field in fields {
        let kind = match field.kind {
            FilterKind::MultiSelect => "multi",
            FilterKind::SingleSelect => "single",
            FilterKind::NumericRange => "range",
            FilterKind::Keyword => "keyword",
        };
        println!(
            "{} {}",
            field.label.bold(),
            format!("({}, {})", field.id, kind).dimmed()
        );
        match render(field, None) {
            FilterControl::MultiSelect(control) => {
                if field.options.is_empty() {
                    println!("    {}", "options load from the server (--remote)".dimmed());
                }
                for (option, _) in control.options() {
                    println!("    [ ] {} {}", option.value, option.label.dimmed());
                }
            }
            FilterControl::SingleSelect(control) => {
                for (option, chosen) in control.options() {
                    let mark = if chosen { "(•)" } else { "( )" };
                    println!("    {} {} {}", mark, option.value, option.label.dimmed());
                    if let Some(tooltip) = &option.tooltip {
                        println!("          {}", tooltip.italic().dimmed());
                    }
                }
            }
            FilterControl::NumericRange(_) => println!(
                "    {} to {}",
                sysmetic::filters::RANGE_MIN,
                sysmetic::filters::RANGE_MAX
            ),
            FilterControl::Keyword(_) => println!("    {}", "free text".dimmed()),
        }
    }
}

pub(super) fn print_series(series: &DualSeries) {
    let dates = series.primary.iter().map(|(ms, _)| *ms);
    for ms in dates {
        let primary = series
            .primary
            .iter()
            .find(|(t, _)| *t == ms)
            .map(|(_, v)| format!("{:>10.2}", v))
            .unwrap_or_default();
        let secondary = series
            .secondary
            .iter()
            .find(|(t, _)| *t == ms)
            .map(|(_, v)| format!("{:>10.2}", v))
            .unwrap_or_else(|| format!("{:>10}", "-"));
        println!(
            "{} {} {}",
            format_point_date(ms),
            primary,
            secondary.dimmed()
        );
    }
    println!(
        "{}",
        format!(
            "{} / {} points",
            series.primary.len(),
            series.secondary.len()
        )
        .dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_wide_glyphs() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Each Hangul syllable is two columns wide
        assert_eq!(truncate_to_width("시스메틱전략", 7), "시스메…");
    }

    #[test]
    fn cells_pad_to_display_width() {
        assert_eq!(cell("전략", 6), "전략  ");
        assert_eq!(cell("ab", 4).width(), 4);
    }

    #[test]
    fn unparseable_dates_are_shown_as_is() {
        assert_eq!(format_time_ago("yesterday").trim(), "yesterday");
    }
}

use crate::models::schedule::parse_time_of_day;
use crate::models::{EventStatus, ScheduleEvent};

fn stamp(event: &ScheduleEvent, time: &str) -> String {
    let time = parse_time_of_day(time).unwrap_or_default();
    event.date.and_time(time).format("%Y%m%dT%H%M%S").to_string()
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace(['\r', '\n'], "\\n")
}

// Values that are not TEXT (UID, URL) cannot carry escapes.
fn single_line(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && !value.chars().any(char::is_control)).then_some(value)
}

pub fn generate_ics(event: &ScheduleEvent) -> String {
    let dtstart = stamp(event, &event.start_time);
    let dtend = stamp(event, &event.end_time);
    let uid = format!("{}@academy", event.id.replace(|c: char| c.is_control(), ""));

    let summary = if event.course.code.is_empty() {
        escape(&event.title)
    } else {
        escape(&format!("{} · {}", event.course.code, event.title))
    };
    let description = escape(&format!(
        "{} ({})",
        if event.course.name.is_empty() {
            "Course session"
        } else {
            event.course.name.as_str()
        },
        event.event_type
    ));
    let location = escape(&event.location);
    let status = match event.status {
        EventStatus::Cancelled => "CANCELLED",
        _ => "CONFIRMED",
    };

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Academy//Schedule//EN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{uid}"),
        format!("DTSTART:{dtstart}"),
        format!("DTEND:{dtend}"),
        format!("SUMMARY:{summary}"),
        format!("DESCRIPTION:{description}"),
        format!("LOCATION:{location}"),
        format!("STATUS:{status}"),
    ];
    let link = event.meeting_link.as_deref().and_then(single_line);
    if let (true, Some(link)) = (event.is_online(), link) {
        lines.push(format!("URL:{link}"));
    }
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    let mut ics = lines.join("\r\n");
    ics.push_str("\r\n");
    ics
}

use iced::widget::container::bordered_box;
use iced::widget::{button, column, container, horizontal_space, row, text, Column, Container, Row, Scrollable, Space};
use iced::{Alignment, Background, Color, Element, Length};
use crate::app::{App, Message};
use crate::models::{display_date, DashboardData, GrievanceStatus, TrendChart};
use super::widgets::{cell, header_cell, stat_card, status_badge, status_color};

const BAR_MAX_WIDTH: f32 = 260.0;

/// Width of one trend bar, scaled against the busiest month.
pub fn bar_width(count: u64, peak: u64) -> f32 {
    if peak == 0 {
        return 0.0;
    }
    BAR_MAX_WIDTH * count as f32 / peak as f32
}

fn bar<'a>(count: u64, peak: u64, color: Color) -> Row<'a, Message> {
    let filled = Container::new(Space::with_height(Length::Fixed(10.0)))
        .width(Length::Fixed(bar_width(count, peak)))
        .style(move |_| container::Style {
            background: Some(Background::Color(color)),
            ..container::Style::default()
        });
    row![filled, text(count.to_string()).size(12)]
        .spacing(6)
        .align_y(Alignment::Center)
}

fn trend<'a>(app: &'a App, chart: &TrendChart) -> Container<'a, Message> {
    let peak = chart.peak();
    let legend = GrievanceStatus::ALL.iter().fold(Row::new().spacing(15), |r, status| {
        r.push(text(status.as_str()).size(13).color(status_color(*status)))
    });

    let mut body = Column::new().spacing(12).push(text("Monthly trend").size(20)).push(legend);
    if chart.months.is_empty() {
        body = body.push(text("No grievances recorded yet").style(text::secondary));
    }
    for point in chart.points() {
        let bars = GrievanceStatus::ALL
            .iter()
            .zip(point.counts)
            .fold(Column::new().spacing(2), |c, (status, count)| c.push(bar(count, peak, status_color(*status))));
        body = body.push(
            row![text(point.month).width(Length::Fixed(70.0)), bars]
                .spacing(10)
                .align_y(Alignment::Center),
        );
    }
    let theme = app.theme.clone();
    Container::new(body)
        .style(move |_| bordered_box(&theme))
        .padding(15)
        .width(Length::Fill)
}

fn recent<'a>(app: &'a App, data: &'a DashboardData) -> Container<'a, Message> {
    let header = row![
        header_cell("ID", 1),
        header_cell("Subject", 3),
        header_cell("Student", 2),
        header_cell("Status", 2),
        header_cell("Created", 2),
    ]
    .spacing(10);

    let mut table = Column::new().spacing(8).push(text("Recent grievances").size(20)).push(header);
    if data.recent_grievances.is_empty() {
        table = table.push(text("No recent grievances").style(text::secondary));
    }
    for grievance in &data.recent_grievances {
        let student = grievance.student_id.as_ref().map(|s| s.name.as_str()).unwrap_or("-");
        let created = grievance.created_at.as_deref().map(display_date).unwrap_or_default();
        let line = row![
            cell(text(format!("#{}", grievance.short_id())), 1),
            cell(text(&grievance.subject), 3),
            cell(text(student), 2),
            cell(status_badge(app, grievance.status), 2),
            cell(text(created), 2),
        ]
        .spacing(10);
        table = table.push(
            button(line)
                .style(button::text)
                .width(Length::Fill)
                .on_press(Message::OpenGrievance(grievance.clone())),
        );
    }
    Container::new(table)
        .style(move |_| bordered_box(&app.theme))
        .padding(15)
        .width(Length::Fill)
}

pub fn dashboard_screen(app: &App) -> Container<Message> {
    let state = &app.dashboard;
    let header = row![
        text("Dashboard").size(30),
        horizontal_space(),
        button("Refresh").on_press_maybe((!state.tracker.is_loading()).then_some(Message::RefreshDashboard)),
    ]
    .align_y(Alignment::Center);

    let mut content = Column::new().spacing(20).push(header);

    if let Some(error) = &state.error {
        content = content.push(
            Container::new(text(error).style(text::danger))
                .style(move |_| bordered_box(&app.theme))
                .padding(12)
                .width(Length::Fill),
        );
    }

    match &state.data {
        None if state.tracker.is_loading() => {
            content = content.push(text("Loading dashboard..."));
        }
        None => {}
        Some(data) => {
            let totals = &data.stats;
            let cards: Element<Message> = row![
                stat_card(app, "Students", totals.students.total, Some(format!("{} active", totals.students.active))),
                stat_card(app, "Officers", totals.officers.total, Some(format!("{} active", totals.officers.active))),
                stat_card(app, "Grievances", totals.grievances.total, Some(format!("{} pending", totals.grievances.pending))),
                stat_card(
                    app,
                    "Resolved",
                    totals.grievances.resolved,
                    Some(format!("{} in progress", totals.grievances.in_progress)),
                ),
            ]
            .spacing(15)
            .into();
            content = content.push(cards).push(trend(app, &data.chart)).push(recent(app, data));
        }
    }

    Container::new(Scrollable::new(column![content].padding(20)))
        .width(Length::Fill)
        .height(Length::Fill)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_the_peak() {
        assert_eq!(bar_width(0, 0), 0.0);
        assert_eq!(bar_width(5, 10), BAR_MAX_WIDTH / 2.0);
        assert_eq!(bar_width(10, 10), BAR_MAX_WIDTH);
    }
}

use chrono::Days;
use eframe::egui;
use egui_plot::{Bar, BarChart, Corner, Legend, Line, Plot};

use crate::{
    detail::{RevenueChart, StockChart},
    model::Trend,
    utils::{datetime::date_to_day_label, text::compact_number},
};

const CHART_HEIGHT: f32 = 300.0;

pub const BEFORE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x88, 0x84, 0xd8);
pub const AFTER_COLOR: egui::Color32 = egui::Color32::from_rgb(0x82, 0xca, 0x9d);
const REVENUE_COLOR: egui::Color32 = egui::Color32::from_rgb(0xff, 0xc6, 0x58);

/// Close prices over time, or the chart's fallback line when there are none.
pub fn stock_chart(
    ui: &mut egui::Ui,
    id: &str,
    chart: &StockChart,
    color: egui::Color32,
    trend_caption: &str,
) {
    ui.label(egui::RichText::new(chart.title).strong().size(15.0));

    let Some(start_date) = chart.points.first().map(|p| p.date) else {
        ui.label(&chart.fallback);
        return;
    };

    let points: Vec<[f64; 2]> = chart
        .points
        .iter()
        .map(|p| [(p.date - start_date).num_days() as f64, p.value])
        .collect();

    let axis = chart.clone();
    let mut plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _| axis.axis_label(mark.value))
        .label_formatter(|name, point| {
            if name.is_empty() || point.x < 0.0 {
                "".to_string()
            } else {
                format!(
                    "[{}] {} ${:.2}",
                    date_to_day_label(&(start_date + Days::new(point.x.round() as u64))),
                    name,
                    point.y
                )
            }
        });
    if let Some((min, max)) = chart.value_range() {
        plot = plot.include_y(min).include_y(max);
    }

    plot.show(ui, |plot_ui| {
        plot_ui.line(Line::new("Price", points).width(1.2).color(color));
    });

    ui.horizontal(|ui| {
        ui.label(format!("Overall Trend ({trend_caption}):"));
        ui.label(
            egui::RichText::new(chart.trend.to_string())
                .strong()
                .color(trend_color(chart.trend)),
        );
    });
}

pub fn revenue_chart(ui: &mut egui::Ui, id: &str, chart: &RevenueChart) {
    ui.label(egui::RichText::new(chart.title).strong().size(15.0));

    if !chart.is_available() {
        ui.label(&chart.fallback);
        return;
    }

    let bars: Vec<Bar> = chart
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Bar::new(i as f64, p.value)
                .name(format!("{} {}", p.label, compact_number(p.value)))
                .fill(REVENUE_COLOR)
        })
        .collect();

    let axis = chart.clone();
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _| axis.axis_label(mark.value))
        .legend(Legend::default().position(Corner::LeftTop))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("Total Revenue", bars).color(REVENUE_COLOR));
        });

    ui.horizontal_wrapped(|ui| {
        for p in &chart.points {
            ui.label(
                egui::RichText::new(format!("{}: {}", p.label, compact_number(p.value)))
                    .color(egui::Color32::DARK_GRAY)
                    .size(12.0),
            );
        }
    });
}

fn trend_color(trend: Trend) -> egui::Color32 {
    match trend {
        Trend::Increase => egui::Color32::from_rgb(0x2e, 0xa0, 0x43),
        Trend::Decrease => egui::Color32::from_rgb(0xd0, 0x3a, 0x3a),
        Trend::Flat | Trend::NotAvailable => egui::Color32::DARK_GRAY,
    }
}

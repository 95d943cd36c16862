use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui::{self, Color32, RichText};
use eframe::egui::{FontData, FontDefinitions, FontFamily};
use panoptic_caption_common::{
    ComparisonResult, ComparisonView, Error, MetricBar, PipelineKind, PipelineView, RequestParameters,
    RequestState, ServiceConfig, Session, Ticket,
};

use crate::io::{build_client, is_image_path, load_image, pick_image, post_caption};
use crate::model::TexturePreview;

const ACCENT: Color32 = Color32::from_rgb(246, 196, 69);
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 20, 60);

enum UiMessage {
    CaptionDone {
        ticket: Ticket,
        outcome: Result<ComparisonResult, Error>,
    },
}

pub struct DesktopApp {
    session: Session<TexturePreview>,
    params: RequestParameters,
    config: Arc<ServiceConfig>,
    client: reqwest::blocking::Client,
    file_status: String,
    tx: Sender<UiMessage>,
    rx: Receiver<UiMessage>,
}

impl DesktopApp {
    pub fn new(ctx: egui::Context, config: ServiceConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            session: Session::new(TexturePreview::new(ctx)),
            params: RequestParameters {
                top_k: config.default_top_k,
            },
            client: build_client(&config),
            config: Arc::new(config),
            file_status: String::new(),
            tx,
            rx,
        }
    }

    fn open_image(&mut self) {
        if let Some(path) = pick_image() {
            self.select_path(&path);
        }
    }

    fn select_path(&mut self, path: &Path) {
        match load_image(path) {
            Ok(image) => {
                self.file_status = image.file_name.clone();
                self.session.select_image(Some(image));
            }
            Err(err) => self.file_status = format!("Load failed: {err:#}"),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let path = dropped
            .into_iter()
            .filter_map(|file| file.path)
            .find(|path| is_image_path(path));
        if let Some(path) = path {
            self.select_path(&path);
        }
    }

    fn submit(&mut self) {
        let Some(pending) = self.session.submit(self.params.top_k) else {
            return;
        };

        let tx = self.tx.clone();
        let client = self.client.clone();
        let config = Arc::clone(&self.config);

        std::thread::spawn(move || {
            let outcome = post_caption(&client, &config, &pending.image, pending.top_k);
            let _ = tx.send(UiMessage::CaptionDone {
                ticket: pending.ticket,
                outcome,
            });
        });
    }

    fn poll_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::CaptionDone { ticket, outcome } => {
                    self.session.complete(ticket, outcome);
                }
            }
        }
    }

    fn render_preview(&self, ui: &mut egui::Ui) {
        match self.session.preview() {
            Some(Some(texture)) => {
                ui.add(egui::Image::new(texture).max_height(420.0).rounding(8.0));
            }
            Some(None) => {
                ui.label(RichText::new("Preview unavailable").color(Color32::from_gray(170)));
            }
            None => {
                ui.label(RichText::new("Open or drop an image to start.").color(Color32::from_gray(170)));
            }
        }
    }

    fn render_state(&self, ui: &mut egui::Ui) {
        match self.session.current_state() {
            RequestState::Idle => {}
            RequestState::Submitting => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Processing…");
                });
            }
            RequestState::Failed(message) => {
                ui.label(RichText::new(format!("Error: {message}")).color(ERROR_COLOR));
            }
            RequestState::Succeeded(result) => {
                render_comparison(ui, &ComparisonView::from_result(result));
            }
        }
    }
}

fn render_comparison(ui: &mut egui::Ui, view: &ComparisonView) {
    ui.columns(2, |columns| {
        render_pipeline(&mut columns[0], &view.baseline);
        render_pipeline(&mut columns[1], &view.panoptic);

        if view.show_labels() {
            let ui = &mut columns[1];
            ui.add_space(8.0);
            ui.label(RichText::new("Top-K labels").strong());
            ui.horizontal_wrapped(|ui| {
                for label in &view.labels {
                    egui::Frame::none()
                        .fill(Color32::from_rgb(31, 35, 48))
                        .stroke(egui::Stroke::new(1.0, Color32::from_gray(60)))
                        .rounding(egui::Rounding::same(10.0))
                        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
                        .show(ui, |ui| {
                            ui.label(RichText::new(label).size(12.0));
                        });
                }
            });
        }
    });
}

fn render_pipeline(ui: &mut egui::Ui, pipeline: &PipelineView) {
    egui::Frame::none()
        .fill(Color32::from_rgb(24, 28, 40))
        .stroke(egui::Stroke::new(1.0, Color32::from_gray(40)))
        .rounding(egui::Rounding::same(10.0))
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.heading(pipeline.kind.title());

            let mut caption = RichText::new(&pipeline.caption);
            if !pipeline.caption_available {
                caption = caption.italics().color(Color32::from_gray(140));
            } else if pipeline.kind == PipelineKind::Panoptic {
                caption = caption.strong();
            }
            ui.label(caption);
            ui.add_space(6.0);

            egui::Grid::new(format!("metrics_{}", pipeline.kind.as_str()))
                .num_columns(2)
                .show(ui, |ui| {
                    for metric in pipeline.metrics() {
                        ui.label(RichText::new(metric.kind.label()).color(Color32::from_gray(200)));
                        render_metric(ui, &metric);
                        ui.end_row();
                    }
                });
        });
}

fn render_metric(ui: &mut egui::Ui, metric: &MetricBar) {
    if metric.is_available() {
        let bar = egui::ProgressBar::new((metric.width_percent() / 100.0) as f32)
            .desired_width(180.0)
            .fill(ACCENT)
            .text(format!("{} ({})", metric.percent_text(), metric.value_text()));
        ui.add(bar);
    } else {
        ui.label(RichText::new("N/A (unavailable)").italics().color(Color32::from_gray(140)));
    }
}

pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\meiryo.ttc",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("cjk_fallback".to_string(), FontData::from_owned(data));
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .push("cjk_fallback".to_string());
            ctx.set_fonts(fonts);
            return;
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.current_state().is_submitting() {
            ctx.request_repaint();
        }
        self.poll_messages();
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open Image…").clicked() {
                    self.open_image();
                }
                if !self.file_status.is_empty() {
                    ui.label(RichText::new(&self.file_status).color(Color32::from_gray(170)));
                }

                ui.separator();
                ui.label("Top-K");
                ui.add(egui::DragValue::new(&mut self.params.top_k));

                let submitting = self.session.current_state().is_submitting();
                let label = if submitting { "Processing…" } else { "Generate" };
                if ui.add_enabled(self.session.can_submit(), egui::Button::new(label)).clicked() {
                    self.submit();
                }

                ui.separator();
                ui.label(RichText::new(&self.config.base_url).color(Color32::from_gray(120)));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Panoptic Captioning");
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_preview(ui);
                ui.add_space(12.0);
                self.render_state(ui);
            });
        });
    }
}

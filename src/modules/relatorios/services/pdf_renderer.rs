use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use printpdf::image_crate::codecs::jpeg::JpegDecoder;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfLayerReference,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::lancamentos::models::Lancamento;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
/// Vertical step per table row, in mm
pub const ROW_HEIGHT: f32 = 6.0;

const TITLE: &str = "Relatório de Lançamentos";
const TITLE_SIZE: f32 = 18.0;
const HEADER_SIZE: f32 = 10.0;
const ROW_SIZE: f32 = 9.0;

/// Fixed five-column table layout (x position in mm from the left edge)
const COLUMNS: [(&str, f32); 5] = [
    ("Nome", MARGIN),
    ("Vencimento", 95.0),
    ("Valor", 130.0),
    ("Status", 160.0),
    ("Parcela", 185.0),
];

/// Baseline of the first table row on a fresh page
pub const FIRST_ROW_Y: f32 = PAGE_HEIGHT - 45.0;

/// A row fits if its bottom edge stays above the printable area
pub fn row_fits(y: f32) -> bool {
    y - ROW_HEIGHT >= MARGIN
}

pub fn format_valor(valor: Decimal) -> String {
    format!("R$ {:.2}", valor.to_f64().unwrap_or_default())
}

pub fn format_data(vencimento: &DateTime<Utc>) -> String {
    vencimento.date_naive().format("%d/%m/%Y").to_string()
}

/// Renders the installment report as a multi-page PDF.
///
/// Every page repeats the header (logo when the asset exists, title,
/// generation date, column captions). A missing or unreadable logo is a
/// warning only.
pub struct ReportRenderer {
    logo_path: PathBuf,
}

impl ReportRenderer {
    pub fn new(logo_path: impl Into<PathBuf>) -> Self {
        Self {
            logo_path: logo_path.into(),
        }
    }

    pub fn render(
        &self,
        lancamentos: &[Lancamento],
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            TITLE,
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Camada 1",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::internal(format!("PDF font error: {}", e)))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::internal(format!("PDF font error: {}", e)))?;

        let logo = self.load_logo();
        let data_geracao = format!("Data de Geração: {}", generated_at.format("%d/%m/%Y"));

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        draw_page_header(&layer, &font, &font_bold, logo.as_ref(), &data_geracao);
        let mut y = FIRST_ROW_Y;

        for lancamento in lancamentos {
            if !row_fits(y) {
                let (page, page_layer) =
                    doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Camada 1");
                layer = doc.get_page(page).get_layer(page_layer);
                draw_page_header(&layer, &font, &font_bold, logo.as_ref(), &data_geracao);
                y = FIRST_ROW_Y;
            }

            draw_row(&layer, &font, lancamento, y);
            y -= ROW_HEIGHT;
        }

        doc.save_to_bytes()
            .map_err(|e| AppError::internal(format!("PDF serialization error: {}", e)))
    }

    /// Decode the logo once; each page clones the image object.
    fn load_logo(&self) -> Option<Image> {
        let file = match File::open(&self.logo_path) {
            Ok(file) => file,
            Err(e) => {
                warn!(
                    path = %self.logo_path.display(),
                    error = %e,
                    "Could not load report logo, rendering without it"
                );
                return None;
            }
        };
        let reader = BufReader::new(file);

        let extension = self
            .logo_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let decoded = match extension.as_str() {
            "jpg" | "jpeg" => JpegDecoder::new(reader)
                .map_err(|e| e.to_string())
                .and_then(|d| Image::try_from(d).map_err(|e| e.to_string())),
            "png" => PngDecoder::new(reader)
                .map_err(|e| e.to_string())
                .and_then(|d| Image::try_from(d).map_err(|e| e.to_string())),
            other => Err(format!("unsupported logo format: {:?}", other)),
        };

        match decoded {
            Ok(image) => Some(image),
            Err(e) => {
                warn!(
                    path = %self.logo_path.display(),
                    error = %e,
                    "Could not decode report logo, rendering without it"
                );
                None
            }
        }
    }
}

fn draw_page_header(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    logo: Option<&Image>,
    data_geracao: &str,
) {
    if let Some(logo) = logo {
        Image::from(logo.image.clone()).add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN)),
                translate_y: Some(Mm(PAGE_HEIGHT - 28.0)),
                dpi: Some(300.0),
                ..Default::default()
            },
        );
    }

    layer.use_text(TITLE, TITLE_SIZE, Mm(55.0), Mm(PAGE_HEIGHT - 22.0), font_bold);
    layer.use_text(
        data_geracao,
        HEADER_SIZE,
        Mm(145.0),
        Mm(PAGE_HEIGHT - 22.0),
        font,
    );

    // Column captions
    let caption_y = PAGE_HEIGHT - 38.0;
    for (header, x) in COLUMNS {
        layer.use_text(header, HEADER_SIZE, Mm(x), Mm(caption_y), font_bold);
    }
}

fn draw_row(layer: &PdfLayerReference, font: &IndirectFontRef, lancamento: &Lancamento, y: f32) {
    let cells = [
        lancamento.nome.clone(),
        format_data(&lancamento.vencimento),
        format_valor(lancamento.valor_mensalidade),
        lancamento.status.as_str().to_uppercase(),
        lancamento.numero_parcela.to_string(),
    ];

    for ((_, x), text) in COLUMNS.iter().zip(cells) {
        layer.use_text(text, ROW_SIZE, Mm(*x), Mm(y), font);
    }
}

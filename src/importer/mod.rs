// ==========================================
// Calculadora de Frete - Camada de Importação
// ==========================================
// Responsabilidade: dados externos → registros internos
// Suporte: Excel, CSV
// ==========================================

// Declaração de módulos
pub mod error;
pub mod file_parser;
pub mod freight_importer_impl;
pub mod freight_importer_trait;
pub mod header_map;
pub mod ingestion;

// Reexporta os tipos centrais
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use freight_importer_impl::FreightImporterImpl;
pub use freight_importer_trait::{FileParser, FreightImporter};
pub use header_map::{
    classificar_campo_lote, classificar_campo_tabela, normalizar_cabecalho, CampoLote, CampoTabela,
};
pub use ingestion::{ingerir_linhas_lote, ingerir_tabela_frete, parse_decimal, parse_quantidade};

// ==========================================
// Calculadora de Frete por Zoneamento - Biblioteca
// ==========================================
// Base: Regras_Comerciais_Frete.md
// Fluxo: planilha → ingestão → motor → exportação
// ==========================================

// ==========================================
// Declaração de módulos
// ==========================================

// Camada de domínio - entidades e tipos
pub mod domain;

// Camada de importação - planilhas externas
pub mod importer;

// Camada de motor - regras de cálculo
pub mod engine;

// Exportação de resultados
pub mod export;

// Sistema de logs
pub mod logging;

// ==========================================
// Reexporta os tipos centrais
// ==========================================

// Tipos do domínio
pub use domain::types::{CalcError, RowStatus, VolumeSize};

// Entidades do domínio
pub use domain::{
    AdditionalDetail, BatchInputRow, BatchResultRow, BatchSummary, CalcResult, FreightRequest,
    FreightRow, FreightTable, VolumeItem,
};

// Motores
pub use engine::{
    BatchProcessor, FreightEngine, DIVISOR_ICMS_ISENTO, DIVISOR_ICMS_PADRAO, PREFIXO_ISENCAO_ICMS,
};

// Importação
pub use importer::{FreightImporter, FreightImporterImpl, ImportError, UniversalFileParser};

// Exportação
pub use export::{exportar_lote_csv, exportar_modelo_lote_csv, RegistroExportacao, ResultProjector};

// ==========================================
// Constantes
// ==========================================

// Versão do sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nome do sistema
pub const APP_NAME: &str = "Calculadora de Frete por Zoneamento";

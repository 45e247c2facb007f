// ==========================================
// Calculadora de Frete - Camada de Domínio
// ==========================================
// Responsabilidade: entidades e tipos do negócio
// Restrição: sem acesso a arquivo, sem lógica de motor
// ==========================================

pub mod freight;
pub mod types;

// Reexporta os tipos centrais
pub use freight::{
    AdditionalDetail, BatchInputRow, BatchResultRow, BatchSummary, CalcResult, FreightRequest,
    FreightRow, FreightTable, VolumeItem,
};
pub use types::{CalcError, RowStatus, VolumeSize};

// ==========================================
// Calculadora de Frete - Camada de Motor
// ==========================================
// Responsabilidade: regras de negócio do cálculo
// Restrição: toda regra registra sua etapa na memória de cálculo
// ==========================================

pub mod batch;
pub mod freight;

// Reexporta os motores
pub use batch::BatchProcessor;
pub use freight::{
    FreightEngine, DIVISOR_ICMS_ISENTO, DIVISOR_ICMS_PADRAO, PREFIXO_ISENCAO_ICMS,
};

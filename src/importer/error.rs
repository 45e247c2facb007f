// ==========================================
// Calculadora de Frete - Erros de Importação
// ==========================================
// Ferramenta: macro derive do thiserror
// ==========================================

use thiserror::Error;

/// Erros da camada de importação/exportação de planilhas
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Erros de arquivo =====
    #[error("Arquivo não encontrado: {0}")]
    ArquivoNaoEncontrado(String),

    #[error("Formato de arquivo não suportado: {0} (apenas .xlsx/.xls/.csv)")]
    FormatoNaoSuportado(String),

    #[error("Falha na leitura do arquivo: {0}")]
    FalhaLeitura(String),

    #[error("Falha ao interpretar Excel: {0}")]
    ErroExcel(String),

    #[error("Falha ao interpretar CSV: {0}")]
    ErroCsv(String),

    // ===== Erros de estrutura =====
    // Única falha fatal da ingestão: planilha sem linha de dados.
    // Célula numérica ilegível NÃO é erro (vira 0, por política).
    #[error("Arquivo vazio ou formato inválido")]
    ArquivoVazioOuInvalido,

    // ===== Erros de exportação =====
    #[error("Falha ao gravar arquivo de exportação: {0}")]
    ErroExportacao(String),

    // ===== Erros genéricos =====
    #[error(transparent)]
    Outro(#[from] anyhow::Error),
}

// Implementa From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FalhaLeitura(err.to_string())
    }
}

// Implementa From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::ErroCsv(err.to_string())
    }
}

// Implementa From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ErroExcel(err.to_string())
    }
}

/// Alias de Result para a camada de importação
pub type ImportResult<T> = Result<T, ImportError>;

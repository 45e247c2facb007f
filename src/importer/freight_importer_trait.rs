// ==========================================
// Calculadora de Frete - Traits de Importação
// ==========================================
// Responsabilidade: definir as interfaces de importação
// (sem implementação)
// ==========================================

use crate::domain::freight::{BatchInputRow, FreightTable};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// Uso: leitura de arquivo → grade bruta (etapa 0)
// Implementadores: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// Interpreta o arquivo como grade bruta de células.
    ///
    /// # Retorno
    /// - Ok(grade): 1ª linha = cabeçalhos, demais = dados
    /// - Err: arquivo inexistente, extensão ou formato inválido
    fn parse_para_grade(&self, caminho: &Path) -> ImportResult<Vec<Vec<String>>>;
}

// ==========================================
// FreightImporter Trait
// ==========================================
// Uso: fachada arquivo → registros tipados
// Implementador: FreightImporterImpl
#[async_trait]
pub trait FreightImporter: Send + Sync {
    /// Importa a tabela de frete de uma planilha (.xlsx/.xls/.csv).
    ///
    /// # Retorno
    /// - Ok(FreightTable): tabela pronta para consulta
    /// - Err: erro de leitura ou `ArquivoVazioOuInvalido`
    ///
    /// Leitura é de tiro único: ou a grade inteira é interpretada,
    /// ou a importação falha por completo.
    async fn importar_tabela_frete(&self, caminho: &Path) -> ImportResult<FreightTable>;

    /// Importa as linhas de lote de uma planilha (.xlsx/.xls/.csv).
    ///
    /// # Retorno
    /// - Ok(linhas): uma `BatchInputRow` por linha de dados válida
    /// - Err: erro de leitura ou `ArquivoVazioOuInvalido`
    async fn importar_linhas_lote(&self, caminho: &Path) -> ImportResult<Vec<BatchInputRow>>;
}

// ==========================================
// Calculadora de Frete - Importador de Planilhas
// ==========================================
// Responsabilidade: integrar o fluxo de importação
// Fluxo: parse do arquivo → ingestão → registros tipados
// ==========================================

use crate::domain::freight::{BatchInputRow, FreightTable};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::freight_importer_trait::{FileParser, FreightImporter};
use crate::importer::ingestion::{ingerir_linhas_lote, ingerir_tabela_frete};
use std::path::Path;
use tracing::{debug, info, instrument};

// ==========================================
// FreightImporterImpl
// ==========================================
pub struct FreightImporterImpl {
    parser: Box<dyn FileParser>,
}

impl FreightImporterImpl {
    pub fn new(parser: Box<dyn FileParser>) -> Self {
        Self { parser }
    }

    /// Importador com o parser universal (extensão decide o formato)
    pub fn padrao() -> Self {
        Self::new(Box::new(UniversalFileParser))
    }
}

#[async_trait::async_trait]
impl FreightImporter for FreightImporterImpl {
    #[instrument(skip(self, caminho))]
    async fn importar_tabela_frete(&self, caminho: &Path) -> ImportResult<FreightTable> {
        info!(arquivo = %caminho.display(), "Importando tabela de frete");

        debug!("Etapa 1: parse do arquivo");
        let grade = self.parser.parse_para_grade(caminho)?;

        debug!(linhas_brutas = grade.len().saturating_sub(1), "Etapa 2: ingestão");
        let linhas = ingerir_tabela_frete(&grade)?;

        info!(zoneamentos = linhas.len(), "Tabela de frete importada");
        Ok(FreightTable::new(linhas))
    }

    #[instrument(skip(self, caminho))]
    async fn importar_linhas_lote(&self, caminho: &Path) -> ImportResult<Vec<BatchInputRow>> {
        info!(arquivo = %caminho.display(), "Importando arquivo de lote");

        debug!("Etapa 1: parse do arquivo");
        let grade = self.parser.parse_para_grade(caminho)?;

        debug!(linhas_brutas = grade.len().saturating_sub(1), "Etapa 2: ingestão");
        let linhas = ingerir_linhas_lote(&grade)?;

        info!(linhas = linhas.len(), "Arquivo de lote importado");
        Ok(linhas)
    }
}

// ==========================================
// Testes unitários
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_temporario(conteudo: &str) -> tempfile::NamedTempFile {
        let mut arquivo = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(arquivo, "{}", conteudo).unwrap();
        arquivo
    }

    #[tokio::test]
    async fn test_importar_tabela_frete_csv() {
        let arquivo = csv_temporario(
            "ZONEAMENTO,CX GRANDE,CX MEDIA,ADD GRANDE\nSP0626900,\"7,00\",\"4,50\",\"1,20\"\n",
        );

        let importador = FreightImporterImpl::padrao();
        let tabela = importador
            .importar_tabela_frete(arquivo.path())
            .await
            .unwrap();

        assert_eq!(tabela.len(), 1);
        let linha = tabela.buscar("sp0626900").unwrap();
        assert_eq!(linha.cx_grande, 7.0);
        assert_eq!(linha.add_grande, 1.2);
    }

    #[tokio::test]
    async fn test_importar_lote_csv() {
        let arquivo = csv_temporario(
            "CTE,ZONEAMENTO,CX GRANDE,ADD GRANDE\n123,SP0626900,1,4\n",
        );

        let importador = FreightImporterImpl::padrao();
        let linhas = importador
            .importar_linhas_lote(arquivo.path())
            .await
            .unwrap();

        assert_eq!(linhas.len(), 1);
        assert_eq!(linhas[0].qtd_grande, 5);
    }

    #[tokio::test]
    async fn test_importar_arquivo_so_com_cabecalho() {
        let arquivo = csv_temporario("CTE,ZONEAMENTO\n");

        let importador = FreightImporterImpl::padrao();
        let resultado = importador.importar_linhas_lote(arquivo.path()).await;

        assert!(resultado.is_err());
    }
}

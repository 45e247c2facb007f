// ==========================================
// Calculadora de Frete - Parsers de Arquivo
// ==========================================
// Suporte: Excel (.xlsx/.xls) / CSV (.csv)
// Saída: grade bruta de células (1ª linha = cabeçalhos)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::freight_importer_trait::FileParser;
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

// ==========================================
// Parser de CSV
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_para_grade(&self, caminho: &Path) -> ImportResult<Vec<Vec<String>>> {
        // Verifica existência
        if !caminho.exists() {
            return Err(ImportError::ArquivoNaoEncontrado(
                caminho.display().to_string(),
            ));
        }

        // Verifica extensão
        if let Some(ext) = caminho.extension() {
            if ext != "csv" {
                return Err(ImportError::FormatoNaoSuportado(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let arquivo = File::open(caminho)?;
        let mut leitor = ReaderBuilder::new()
            .has_headers(false) // a 1ª linha da grade É o cabeçalho
            .flexible(true) // permite linhas de comprimentos diferentes
            .from_reader(arquivo);

        let mut grade = Vec::new();
        for registro in leitor.records() {
            let registro = registro?;
            let linha: Vec<String> = registro.iter().map(|v| v.trim().to_string()).collect();

            // Pula linhas de dados totalmente em branco (cabeçalho fica)
            if !grade.is_empty() && linha.iter().all(|v| v.is_empty()) {
                continue;
            }

            grade.push(linha);
        }

        Ok(grade)
    }
}

// ==========================================
// Parser de Excel
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_para_grade(&self, caminho: &Path) -> ImportResult<Vec<Vec<String>>> {
        // Verifica existência
        if !caminho.exists() {
            return Err(ImportError::ArquivoNaoEncontrado(
                caminho.display().to_string(),
            ));
        }

        // Verifica extensão
        let ext = caminho.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::FormatoNaoSuportado(ext.to_string()));
        }

        let mut pasta: Xlsx<_> = open_workbook(caminho)
            .map_err(|e: calamine::XlsxError| ImportError::ErroExcel(e.to_string()))?;

        // Lê a primeira aba
        let abas = pasta.sheet_names();
        if abas.is_empty() {
            return Err(ImportError::ErroExcel(
                "Arquivo Excel sem abas".to_string(),
            ));
        }

        let aba = abas[0].clone();
        let faixa = pasta
            .worksheet_range(&aba)
            .map_err(|e| ImportError::ErroExcel(e.to_string()))?;

        let mut grade = Vec::new();
        for linha_celulas in faixa.rows() {
            let linha: Vec<String> = linha_celulas
                .iter()
                .map(|celula| celula.to_string().trim().to_string())
                .collect();

            // Pula linhas de dados totalmente em branco (cabeçalho fica)
            if !grade.is_empty() && linha.iter().all(|v| v.is_empty()) {
                continue;
            }

            grade.push(linha);
        }

        Ok(grade)
    }
}

// ==========================================
// Parser universal (escolhe pela extensão)
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_para_grade(&self, caminho: &Path) -> ImportResult<Vec<Vec<String>>> {
        let ext = caminho
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_para_grade(caminho),
            "xlsx" | "xls" => ExcelParser.parse_para_grade(caminho),
            _ => Err(ImportError::FormatoNaoSuportado(ext)),
        }
    }
}

// ==========================================
// Testes unitários
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_temporario(conteudo: &str) -> NamedTempFile {
        let mut arquivo = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(arquivo, "{}", conteudo).unwrap();
        arquivo
    }

    #[test]
    fn test_csv_parser_arquivo_valido() {
        let arquivo = csv_temporario("ZONEAMENTO,CX MEDIA\nSP0626900,\"4,50\"\nSP0626901,5.00\n");

        let grade = CsvParser.parse_para_grade(arquivo.path()).unwrap();

        assert_eq!(grade.len(), 3);
        assert_eq!(grade[0], vec!["ZONEAMENTO", "CX MEDIA"]);
        assert_eq!(grade[1], vec!["SP0626900", "4,50"]);
    }

    #[test]
    fn test_csv_parser_arquivo_inexistente() {
        let resultado = CsvParser.parse_para_grade(Path::new("nao_existe.csv"));
        assert!(matches!(
            resultado,
            Err(ImportError::ArquivoNaoEncontrado(_))
        ));
    }

    #[test]
    fn test_csv_parser_pula_linhas_em_branco() {
        let arquivo = csv_temporario("ZONEAMENTO,CX MEDIA\nSP1,1\n,\nSP2,2\n");

        let grade = CsvParser.parse_para_grade(arquivo.path()).unwrap();

        // Cabeçalho + 2 linhas de dados; a linha em branco some
        assert_eq!(grade.len(), 3);
    }

    #[test]
    fn test_universal_extensao_nao_suportada() {
        let resultado = UniversalFileParser.parse_para_grade(Path::new("tabela.txt"));
        assert!(matches!(resultado, Err(ImportError::FormatoNaoSuportado(_))));
    }
}

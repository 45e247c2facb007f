// ==========================================
// Calculadora de Frete - Exportação de Resultados
// ==========================================
// Base: Planilhas_Operacao.md - layout da planilha de saída
// Responsabilidade: resultado do lote → registro plano + CSV
// ==========================================

use crate::domain::freight::BatchResultRow;
use crate::importer::error::{ImportError, ImportResult};
use serde::Serialize;
use std::path::Path;
use tracing::info;

// ==========================================
// RegistroExportacao - layout fixo da planilha de saída
// ==========================================
// Os rótulos de coluna são contrato com a operação; não renomear.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistroExportacao {
    #[serde(rename = "CTE")]
    pub cte: String,
    #[serde(rename = "Zoneamento")]
    pub zoneamento: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Valor Com ICMS (R$)")]
    pub valor_com_icms: f64,
    #[serde(rename = "Valor Sem ICMS (R$)")]
    pub valor_sem_icms: f64,
    #[serde(rename = "Valor 1º Vol (R$)")]
    pub valor_primeiro_volume: f64,
    #[serde(rename = "Valor Adicionais (R$)")]
    pub valor_adicionais: f64,
    #[serde(rename = "GRIS Aplicado (R$)")]
    pub gris_aplicado: f64,
    #[serde(rename = "Divisor ICMS")]
    pub divisor_icms: f64,
    #[serde(rename = "Obs")]
    pub observacoes: String,
    #[serde(rename = "Total Qtd Extra G.")]
    pub qtd_extra_grande: u32,
    #[serde(rename = "Total Qtd Grande")]
    pub qtd_grande: u32,
    #[serde(rename = "Total Qtd Media")]
    pub qtd_media: u32,
    #[serde(rename = "Total Qtd Pequena")]
    pub qtd_pequena: u32,
    #[serde(rename = "Total Qtd Micro")]
    pub qtd_micro: u32,
}

// ==========================================
// ResultProjector - projeção para o layout de saída
// ==========================================
pub struct ResultProjector;

impl ResultProjector {
    /// Reorganiza uma linha de resultado no layout plano de
    /// exportação (sem efeito colateral)
    pub fn projetar(linha: &BatchResultRow) -> RegistroExportacao {
        RegistroExportacao {
            cte: linha.cte.clone(),
            zoneamento: linha.zoneamento.clone(),
            status: linha.status.to_string(),
            valor_com_icms: linha.frete_final,
            valor_sem_icms: linha.frete_bruto,
            valor_primeiro_volume: linha.valor_primeiro_volume,
            valor_adicionais: linha.valor_total_adicionais,
            gris_aplicado: linha.gris_aplicado,
            divisor_icms: linha.divisor_icms,
            observacoes: linha.observacoes.clone(),
            qtd_extra_grande: linha.qtd_extra_grande,
            qtd_grande: linha.qtd_grande,
            qtd_media: linha.qtd_media,
            qtd_pequena: linha.qtd_pequena,
            qtd_micro: linha.qtd_micro,
        }
    }
}

// ==========================================
// Escrita de CSV
// ==========================================

/// Grava os resultados do lote em CSV com o layout fixo.
///
/// Escrita de tiro único: ou o arquivo inteiro é gravado, ou a
/// exportação falha por completo.
pub fn exportar_lote_csv(resultados: &[BatchResultRow], caminho: &Path) -> ImportResult<()> {
    let mut escritor = csv::Writer::from_path(caminho)
        .map_err(|e| ImportError::ErroExportacao(e.to_string()))?;

    for linha in resultados {
        escritor
            .serialize(ResultProjector::projetar(linha))
            .map_err(|e| ImportError::ErroExportacao(e.to_string()))?;
    }

    escritor
        .flush()
        .map_err(|e| ImportError::ErroExportacao(e.to_string()))?;

    info!(linhas = resultados.len(), arquivo = %caminho.display(), "Exportação concluída");
    Ok(())
}

// ==========================================
// Modelo de arquivo de lote
// ==========================================

/// Grade do modelo de input de lote: cabeçalhos aceitos pela
/// ingestão + uma linha de exemplo
pub fn grade_modelo_lote() -> Vec<Vec<String>> {
    let cabecalhos = [
        "CTE",
        "ZONEAMENTO",
        "CX EXTRA GRANDE",
        "CX GRANDE",
        "CX MEDIA",
        "CX PEQUENA",
        "CX MICRO",
        "ADD EXTRA GRANDE",
        "ADD GRANDE",
        "ADD MEDIA",
        "ADD PEQUENA",
        "ADD MICRO",
    ];
    let exemplo = [
        "123456", "SP0626900", "1", "0", "0", "0", "0", "10", "5", "0", "0", "0",
    ];

    vec![
        cabecalhos.iter().map(|c| c.to_string()).collect(),
        exemplo.iter().map(|c| c.to_string()).collect(),
    ]
}

/// Grava o modelo de input de lote em CSV
pub fn exportar_modelo_lote_csv(caminho: &Path) -> ImportResult<()> {
    let mut escritor = csv::Writer::from_path(caminho)
        .map_err(|e| ImportError::ErroExportacao(e.to_string()))?;

    for linha in grade_modelo_lote() {
        escritor
            .write_record(&linha)
            .map_err(|e| ImportError::ErroExportacao(e.to_string()))?;
    }

    escritor
        .flush()
        .map_err(|e| ImportError::ErroExportacao(e.to_string()))?;
    Ok(())
}

// ==========================================
// Testes unitários
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::RowStatus;

    fn linha_resultado() -> BatchResultRow {
        BatchResultRow {
            cte: "123456".to_string(),
            zoneamento: "SP0626900".to_string(),
            gris: 0.0,
            qtd_extra_grande: 16,
            qtd_grande: 0,
            qtd_media: 0,
            qtd_pequena: 0,
            qtd_micro: 0,
            extras: vec![],
            frete_final: 38.53,
            frete_bruto: 33.91,
            divisor_icms: 0.88,
            valor_primeiro_volume: 9.16,
            valor_total_adicionais: 24.75,
            gris_aplicado: 0.0,
            status: RowStatus::Sucesso,
            observacoes: "Maior: EXTRA GRANDE (5)".to_string(),
        }
    }

    #[test]
    fn test_projetar_mapeia_campos() {
        let registro = ResultProjector::projetar(&linha_resultado());

        assert_eq!(registro.cte, "123456");
        assert_eq!(registro.status, "SUCESSO");
        assert_eq!(registro.valor_com_icms, 38.53);
        assert_eq!(registro.valor_sem_icms, 33.91);
        assert_eq!(registro.qtd_extra_grande, 16);
    }

    #[test]
    fn test_exportar_csv_com_rotulos_fixos() {
        let arquivo = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();

        exportar_lote_csv(&[linha_resultado()], arquivo.path()).unwrap();

        let conteudo = std::fs::read_to_string(arquivo.path()).unwrap();
        let mut linhas = conteudo.lines();

        let cabecalho = linhas.next().unwrap();
        assert!(cabecalho.starts_with("CTE,Zoneamento,Status"));
        assert!(cabecalho.contains("Valor Com ICMS (R$)"));
        assert!(cabecalho.contains("Divisor ICMS"));
        assert!(cabecalho.contains("Total Qtd Micro"));

        let dados = linhas.next().unwrap();
        assert!(dados.contains("123456"));
        assert!(dados.contains("38.53"));
        assert!(dados.contains("SUCESSO"));
    }

    #[test]
    fn test_modelo_lote_reingere_no_proprio_pipeline() {
        // O modelo gerado precisa ser aceito pela ingestão de lote
        let grade = grade_modelo_lote();
        let linhas = crate::importer::ingestion::ingerir_linhas_lote(&grade).unwrap();

        assert_eq!(linhas.len(), 1);
        assert_eq!(linhas[0].cte, "123456");
        // CX 1 + ADD 10 somados
        assert_eq!(linhas[0].qtd_extra_grande, 11);
        assert_eq!(linhas[0].qtd_grande, 5);
    }
}

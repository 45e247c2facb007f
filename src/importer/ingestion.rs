// ==========================================
// Calculadora de Frete - Ingestão Tabular
// ==========================================
// Responsabilidade: grade bruta de células → registros tipados
// Fluxo: normalizar cabeçalhos → classificar colunas → ler linhas
// ==========================================
// Política de leniência: célula numérica ilegível vira 0, nunca
// erro. A única falha é estrutural (menos de 2 linhas); a ingestão
// nunca falha parcialmente.
// ==========================================

use crate::domain::freight::{BatchInputRow, FreightRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::header_map::{
    classificar_campo_lote, classificar_campo_tabela, normalizar_cabecalho, CampoLote, CampoTabela,
};
use tracing::debug;

// ==========================================
// Normalização numérica
// ==========================================

/// Interpreta um valor decimal vindo de célula de planilha.
///
/// Vírgula decimal (formato pt-BR) é normalizada para ponto antes
/// do parse. Valor vazio ou ilegível vale 0.
pub fn parse_decimal(texto: &str) -> f64 {
    texto
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .unwrap_or(0.0)
}

/// Interpreta uma quantidade de volumes: inteiro não-negativo.
/// Negativo vira 0; fração é truncada; ilegível vira 0.
pub fn parse_quantidade(texto: &str) -> u32 {
    parse_decimal(texto).max(0.0).trunc() as u32
}

// ==========================================
// Modo tabela de frete
// ==========================================

/// Converte a grade (1ª linha = cabeçalhos) em linhas da tabela de
/// frete.
///
/// Linha sem zoneamento, ou sem célula preenchida de preço de 1º
/// volume MEDIA/GRANDE, é descartada como inválida. Com colunas
/// duplicadas para o mesmo campo, a última preenchida vence.
pub fn ingerir_tabela_frete(grade: &[Vec<String>]) -> ImportResult<Vec<FreightRow>> {
    if grade.len() < 2 {
        return Err(ImportError::ArquivoVazioOuInvalido);
    }

    let campos: Vec<Option<CampoTabela>> = grade[0]
        .iter()
        .map(|cabecalho| classificar_campo_tabela(&normalizar_cabecalho(cabecalho)))
        .collect();

    let mut linhas = Vec::new();
    for (numero, celulas) in grade[1..].iter().enumerate() {
        let mut linha = FreightRow::default();
        let mut tem_cx_media = false;
        let mut tem_cx_grande = false;

        for (coluna, campo) in campos.iter().enumerate() {
            let celula = celulas.get(coluna).map(|c| c.trim()).unwrap_or("");
            if celula.is_empty() {
                continue;
            }

            match campo {
                Some(CampoTabela::Zoneamento) => linha.zoneamento = celula.to_string(),
                Some(CampoTabela::Gris) => linha.gris = Some(parse_decimal(celula)),
                Some(CampoTabela::Cx(tamanho)) => {
                    use crate::domain::types::VolumeSize::*;
                    let valor = parse_decimal(celula);
                    match tamanho {
                        ExtraGrande => linha.cx_extra_grande = valor,
                        Grande => {
                            linha.cx_grande = valor;
                            tem_cx_grande = true;
                        }
                        Media => {
                            linha.cx_media = valor;
                            tem_cx_media = true;
                        }
                        Pequena => linha.cx_pequena = valor,
                        Micro => linha.cx_micro = valor,
                    }
                }
                Some(CampoTabela::Add(tamanho)) => {
                    use crate::domain::types::VolumeSize::*;
                    let valor = parse_decimal(celula);
                    match tamanho {
                        ExtraGrande => linha.add_extra_grande = valor,
                        Grande => linha.add_grande = valor,
                        Media => linha.add_media = valor,
                        Pequena => linha.add_pequena = valor,
                        Micro => linha.add_micro = valor,
                    }
                }
                None => {}
            }
        }

        if linha.zoneamento.is_empty() || !(tem_cx_media || tem_cx_grande) {
            debug!(linha = numero + 2, "Linha de tabela inválida descartada");
            continue;
        }

        linhas.push(linha);
    }

    Ok(linhas)
}

// ==========================================
// Modo lote
// ==========================================

/// Converte a grade (1ª linha = cabeçalhos) em linhas de lote.
///
/// Colunas que resolvem para a mesma quantidade (CX, ADD e QTD do
/// mesmo tamanho) são SOMADAS: o total de caixas do embarque é a
/// soma das caixas de 1º volume e das adicionais. Linha sem CTE e
/// sem zoneamento é descartada como vazia. Colunas desconhecidas
/// viajam em `extras`.
pub fn ingerir_linhas_lote(grade: &[Vec<String>]) -> ImportResult<Vec<BatchInputRow>> {
    if grade.len() < 2 {
        return Err(ImportError::ArquivoVazioOuInvalido);
    }

    let cabecalhos = &grade[0];
    let campos: Vec<Option<CampoLote>> = cabecalhos
        .iter()
        .map(|cabecalho| classificar_campo_lote(&normalizar_cabecalho(cabecalho)))
        .collect();

    let mut linhas = Vec::new();
    for (numero, celulas) in grade[1..].iter().enumerate() {
        let mut linha = BatchInputRow::default();

        for (coluna, campo) in campos.iter().enumerate() {
            let celula = celulas.get(coluna).map(|c| c.trim()).unwrap_or("");
            if celula.is_empty() {
                continue;
            }

            match campo {
                Some(CampoLote::Cte) => linha.cte = celula.to_string(),
                Some(CampoLote::Zoneamento) => linha.zoneamento = celula.to_string(),
                Some(CampoLote::Gris) => linha.gris = parse_decimal(celula),
                Some(CampoLote::Qtd(tamanho)) => {
                    use crate::domain::types::VolumeSize::*;
                    let qtd = parse_quantidade(celula);
                    match tamanho {
                        ExtraGrande => linha.qtd_extra_grande += qtd,
                        Grande => linha.qtd_grande += qtd,
                        Media => linha.qtd_media += qtd,
                        Pequena => linha.qtd_pequena += qtd,
                        Micro => linha.qtd_micro += qtd,
                    }
                }
                None => linha
                    .extras
                    .push((cabecalhos[coluna].trim().to_string(), celula.to_string())),
            }
        }

        if linha.cte.is_empty() && linha.zoneamento.is_empty() {
            debug!(linha = numero + 2, "Linha de lote em branco descartada");
            continue;
        }

        linhas.push(linha);
    }

    Ok(linhas)
}

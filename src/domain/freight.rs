// ==========================================
// Calculadora de Frete - Entidades do Domínio
// ==========================================
// Base: Regras_Comerciais_Frete.md - 2. Tabela de frete e resultado
// Restrição: sem lógica de cálculo aqui, apenas dados e consulta
// ==========================================

use crate::domain::types::{CalcError, RowStatus, VolumeSize};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// FreightRow - Linha da tabela de frete
// ==========================================
// Uma entrada por zoneamento: preço do 1º volume e preço de
// adicional para cada tamanho, mais GRIS opcional embutido.
// Preço ausente ou ilegível na planilha vale 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreightRow {
    // Chave de zoneamento (texto livre, comparação sem caixa e sem espaços nas bordas)
    pub zoneamento: String,

    // GRIS embutido na tabela (precedência sobre GRIS manual)
    pub gris: Option<f64>,

    // Preços do 1º volume
    pub cx_extra_grande: f64,
    pub cx_grande: f64,
    pub cx_media: f64,
    pub cx_pequena: f64,
    pub cx_micro: f64,

    // Preços de volume adicional
    pub add_extra_grande: f64,
    pub add_grande: f64,
    pub add_media: f64,
    pub add_pequena: f64,
    pub add_micro: f64,
}

impl FreightRow {
    /// Preço do 1º volume para o tamanho
    pub fn valor_primeiro_volume(&self, tamanho: VolumeSize) -> f64 {
        match tamanho {
            VolumeSize::ExtraGrande => self.cx_extra_grande,
            VolumeSize::Grande => self.cx_grande,
            VolumeSize::Media => self.cx_media,
            VolumeSize::Pequena => self.cx_pequena,
            VolumeSize::Micro => self.cx_micro,
        }
    }

    /// Preço de adicional para o tamanho
    pub fn valor_adicional(&self, tamanho: VolumeSize) -> f64 {
        match tamanho {
            VolumeSize::ExtraGrande => self.add_extra_grande,
            VolumeSize::Grande => self.add_grande,
            VolumeSize::Media => self.add_media,
            VolumeSize::Pequena => self.add_pequena,
            VolumeSize::Micro => self.add_micro,
        }
    }
}

// ==========================================
// FreightTable - Tabela de frete em memória
// ==========================================
// Carregada uma vez pela ingestão e compartilhada somente-leitura
// por todas as chamadas de cálculo da sessão.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreightTable {
    linhas: Vec<FreightRow>,
}

impl FreightTable {
    pub fn new(linhas: Vec<FreightRow>) -> Self {
        Self { linhas }
    }

    /// Busca por zoneamento: comparação sem caixa, ignorando espaços
    /// nas bordas. Com zoneamentos duplicados vale a PRIMEIRA
    /// ocorrência da tabela.
    pub fn buscar(&self, zoneamento: &str) -> Option<&FreightRow> {
        let alvo = zoneamento.trim().to_uppercase();
        self.linhas
            .iter()
            .find(|linha| linha.zoneamento.trim().to_uppercase() == alvo)
    }

    pub fn linhas(&self) -> &[FreightRow] {
        &self.linhas
    }

    pub fn len(&self) -> usize {
        self.linhas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.linhas.is_empty()
    }
}

// ==========================================
// VolumeItem / FreightRequest - Pedido de cálculo
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeItem {
    pub tipo: VolumeSize,
    pub qtd: u32,
}

/// Um embarque a ser precificado contra a tabela.
///
/// A lista de volumes é ordenada; tamanhos repetidos são somados
/// pelo motor. Quantidade zero é ignorada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreightRequest {
    pub zoneamento: String,
    pub volumes: Vec<VolumeItem>,
    // GRIS manual (ignorado quando a tabela traz GRIS positivo)
    pub gris: Option<f64>,
}

// ==========================================
// AdditionalDetail / CalcResult - Resultado do cálculo
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalDetail {
    pub tipo: VolumeSize,
    pub qtd: u32,
    pub valor_unitario: f64,
    pub subtotal: f64,
}

/// Resultado de um cálculo de frete, com memória de cálculo.
///
/// `passos` é um log ordenado, append-only: uma linha por etapa da
/// derivação, na ordem em que as etapas executaram. Em caso de erro
/// todos os campos numéricos ficam zerados e a última linha do log
/// registra o motivo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcResult {
    pub zoneamento: String,

    // Tamanho escolhido como 1º volume e sua prioridade
    pub maior_tipo: Option<VolumeSize>,
    pub prioridade: Option<u8>,

    // Valores derivados (totais arredondados a 2 casas)
    pub primeiro_volume: f64,
    pub adicionais: Vec<AdditionalDetail>,
    pub soma_adicionais: f64,
    pub gris: f64,
    pub icms_divisor: f64,
    pub frete_bruto: f64,
    pub frete_final_icms: f64,

    // Memória de cálculo
    pub passos: Vec<String>,

    pub erro: Option<CalcError>,
}

impl CalcResult {
    pub fn sucesso(&self) -> bool {
        self.erro.is_none()
    }

    /// Rótulo do maior tipo para exibição/observação:
    /// "EXTRA GRANDE (5)", "Nenhum" (sem volumes) ou "N/A" (erro).
    pub fn rotulo_maior_tipo(&self) -> String {
        if self.erro.is_some() {
            return "N/A".to_string();
        }
        match (self.maior_tipo, self.prioridade) {
            (Some(tipo), Some(prioridade)) => format!("{} ({})", tipo, prioridade),
            _ => "Nenhum".to_string(),
        }
    }
}

// ==========================================
// BatchInputRow - Linha de entrada do lote
// ==========================================
// Criada pela ingestão, consumida uma única vez pelo processador
// de lote. Colunas da planilha que não casam com nenhum campo
// conhecido são preservadas em `extras`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchInputRow {
    // Identificador de correlação (CTE / NF / nota)
    pub cte: String,
    pub zoneamento: String,

    // GRIS manual informado na planilha (0 = ausente)
    pub gris: f64,

    // Quantidades totais por tamanho (colunas CX + ADD somadas)
    pub qtd_extra_grande: u32,
    pub qtd_grande: u32,
    pub qtd_media: u32,
    pub qtd_pequena: u32,
    pub qtd_micro: u32,

    // Colunas de passagem não reconhecidas (cabeçalho bruto, valor)
    pub extras: Vec<(String, String)>,
}

impl BatchInputRow {
    /// Quantidade total para o tamanho
    pub fn qtd(&self, tamanho: VolumeSize) -> u32 {
        match tamanho {
            VolumeSize::ExtraGrande => self.qtd_extra_grande,
            VolumeSize::Grande => self.qtd_grande,
            VolumeSize::Media => self.qtd_media,
            VolumeSize::Pequena => self.qtd_pequena,
            VolumeSize::Micro => self.qtd_micro,
        }
    }
}

// ==========================================
// BatchResultRow - Linha de saída do lote
// ==========================================
// Linha de entrada acrescida dos campos do resultado projetados,
// status e observação de uma linha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResultRow {
    pub cte: String,
    pub zoneamento: String,
    pub gris: f64,
    pub qtd_extra_grande: u32,
    pub qtd_grande: u32,
    pub qtd_media: u32,
    pub qtd_pequena: u32,
    pub qtd_micro: u32,
    pub extras: Vec<(String, String)>,

    // Campos projetados do CalcResult
    pub frete_final: f64,
    pub frete_bruto: f64,
    pub divisor_icms: f64,
    pub valor_primeiro_volume: f64,
    pub valor_total_adicionais: f64,
    pub gris_aplicado: f64,

    pub status: RowStatus,
    pub observacoes: String,
}

// ==========================================
// BatchSummary - Resumo do processamento do lote
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub lote_id: String,
    pub total: usize,
    pub sucessos: usize,
    pub erros: usize,
    pub iniciado_em: DateTime<Utc>,
    pub concluido_em: DateTime<Utc>,
}

// ==========================================
// Testes unitários
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn linha(zoneamento: &str, cx_media: f64) -> FreightRow {
        FreightRow {
            zoneamento: zoneamento.to_string(),
            cx_media,
            ..FreightRow::default()
        }
    }

    #[test]
    fn test_buscar_sem_caixa_e_sem_bordas() {
        let tabela = FreightTable::new(vec![linha("SP0626900", 10.0)]);

        assert!(tabela.buscar("sp0626900").is_some());
        assert!(tabela.buscar("  SP0626900  ").is_some());
        assert!(tabela.buscar("RJ0001").is_none());
    }

    #[test]
    fn test_buscar_duplicado_primeira_ocorrencia_vence() {
        let tabela = FreightTable::new(vec![linha("SP0626900", 10.0), linha("SP0626900", 99.0)]);

        let encontrada = tabela.buscar("SP0626900").unwrap();
        assert_eq!(encontrada.cx_media, 10.0, "primeira ocorrência deve vencer");
    }

    #[test]
    fn test_precos_por_tamanho() {
        let linha = FreightRow {
            zoneamento: "SP1".to_string(),
            cx_extra_grande: 9.16,
            add_extra_grande: 1.65,
            cx_micro: 1.0,
            add_micro: 0.5,
            ..FreightRow::default()
        };

        assert_eq!(linha.valor_primeiro_volume(VolumeSize::ExtraGrande), 9.16);
        assert_eq!(linha.valor_adicional(VolumeSize::ExtraGrande), 1.65);
        assert_eq!(linha.valor_primeiro_volume(VolumeSize::Micro), 1.0);
        assert_eq!(linha.valor_adicional(VolumeSize::Micro), 0.5);
        // Preço não informado vale 0
        assert_eq!(linha.valor_primeiro_volume(VolumeSize::Grande), 0.0);
    }

    #[test]
    fn test_rotulo_maior_tipo() {
        let mut resultado = CalcResult {
            zoneamento: "SP1".to_string(),
            maior_tipo: Some(VolumeSize::ExtraGrande),
            prioridade: Some(5),
            primeiro_volume: 0.0,
            adicionais: vec![],
            soma_adicionais: 0.0,
            gris: 0.0,
            icms_divisor: 0.88,
            frete_bruto: 0.0,
            frete_final_icms: 0.0,
            passos: vec![],
            erro: None,
        };
        assert_eq!(resultado.rotulo_maior_tipo(), "EXTRA GRANDE (5)");

        resultado.maior_tipo = None;
        resultado.prioridade = None;
        assert_eq!(resultado.rotulo_maior_tipo(), "Nenhum");

        resultado.erro = Some(CalcError::ZoneamentoNaoEncontrado);
        assert_eq!(resultado.rotulo_maior_tipo(), "N/A");
    }
}

// ==========================================
// Calculadora de Frete - Tipos do Domínio
// ==========================================
// Base: Regras_Comerciais_Frete.md - 1. Tipos de volume
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ==========================================
// Tamanho de Volume (Volume Size)
// ==========================================
// Enumeração fechada com prioridade fixa por tamanho.
// A prioridade é constante do domínio, não é configurável.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeSize {
    #[serde(rename = "EXTRA GRANDE")]
    ExtraGrande,
    #[serde(rename = "GRANDE")]
    Grande,
    #[serde(rename = "MEDIA")]
    Media,
    #[serde(rename = "PEQUENA")]
    Pequena,
    #[serde(rename = "MICRO")]
    Micro,
}

impl VolumeSize {
    /// Todos os tamanhos, do maior para o menor (ordem de prioridade)
    pub const TODOS: [VolumeSize; 5] = [
        VolumeSize::ExtraGrande,
        VolumeSize::Grande,
        VolumeSize::Media,
        VolumeSize::Pequena,
        VolumeSize::Micro,
    ];

    /// Prioridade fixa do tamanho (EXTRA GRANDE = 5 ... MICRO = 1)
    ///
    /// O "1º volume" de um embarque é sempre uma unidade do tamanho
    /// de maior prioridade presente, independente das quantidades.
    pub fn prioridade(&self) -> u8 {
        match self {
            VolumeSize::ExtraGrande => 5,
            VolumeSize::Grande => 4,
            VolumeSize::Media => 3,
            VolumeSize::Pequena => 2,
            VolumeSize::Micro => 1,
        }
    }
}

impl fmt::Display for VolumeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeSize::ExtraGrande => write!(f, "EXTRA GRANDE"),
            VolumeSize::Grande => write!(f, "GRANDE"),
            VolumeSize::Media => write!(f, "MEDIA"),
            VolumeSize::Pequena => write!(f, "PEQUENA"),
            VolumeSize::Micro => write!(f, "MICRO"),
        }
    }
}

// ==========================================
// Status de Linha do Lote
// ==========================================
// Serialização: SCREAMING_SNAKE_CASE (mesmo texto exibido na planilha)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowStatus {
    Sucesso,
    Erro,
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowStatus::Sucesso => write!(f, "SUCESSO"),
            RowStatus::Erro => write!(f, "ERRO"),
        }
    }
}

// ==========================================
// Erro de Cálculo
// ==========================================
// Resultado de negócio, não exceção: viaja dentro do CalcResult.
// Zoneamento ausente é o único caso terminal; preço faltante,
// GRIS faltante e lista de volumes vazia são casos válidos com
// comportamento zero definido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CalcError {
    #[error("Zoneamento não encontrado")]
    ZoneamentoNaoEncontrado,
}

// ==========================================
// Testes unitários
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prioridade_decrescente() {
        // TODOS está em ordem estrita de prioridade
        let prioridades: Vec<u8> = VolumeSize::TODOS.iter().map(|t| t.prioridade()).collect();
        assert_eq!(prioridades, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_prioridades_distintas() {
        // Empate de prioridade é impossível por construção
        for (i, a) in VolumeSize::TODOS.iter().enumerate() {
            for b in VolumeSize::TODOS.iter().skip(i + 1) {
                assert_ne!(a.prioridade(), b.prioridade());
            }
        }
    }

    #[test]
    fn test_rotulos_exibicao() {
        assert_eq!(VolumeSize::ExtraGrande.to_string(), "EXTRA GRANDE");
        assert_eq!(VolumeSize::Micro.to_string(), "MICRO");
        assert_eq!(RowStatus::Sucesso.to_string(), "SUCESSO");
        assert_eq!(RowStatus::Erro.to_string(), "ERRO");
    }

    #[test]
    fn test_erro_calculo_mensagem() {
        assert_eq!(
            CalcError::ZoneamentoNaoEncontrado.to_string(),
            "Zoneamento não encontrado"
        );
    }
}

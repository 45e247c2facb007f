// ==========================================
// Calculadora de Frete - Mapeamento de Cabeçalhos
// ==========================================
// Base: Planilhas_Operacao.md - nomes de coluna aceitos
// Responsabilidade: cabeçalho bruto → campo canônico
// ==========================================
// As planilhas chegam com cabeçalhos inconsistentes (acentos,
// caixa, ordem, abreviações). A reconciliação é por fragmento de
// substring sobre o cabeçalho normalizado, com regras avaliadas de
// cima para baixo: fragmento mais específico antes do mais genérico
// ("extra_grande" antes de "grande"), senão a coluna EXTRA GRANDE
// seria classificada como GRANDE.
// ==========================================

use crate::domain::types::VolumeSize;

// ==========================================
// Campos canônicos
// ==========================================

/// Campo canônico de uma coluna da tabela de frete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampoTabela {
    Zoneamento,
    Gris,
    /// Preço do 1º volume
    Cx(VolumeSize),
    /// Preço de adicional
    Add(VolumeSize),
}

/// Campo canônico de uma coluna do arquivo de lote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampoLote {
    Cte,
    Zoneamento,
    Gris,
    /// Quantidade total do tamanho (colunas repetidas são somadas)
    Qtd(VolumeSize),
}

// ==========================================
// Normalização
// ==========================================

/// Normaliza um cabeçalho bruto para a forma canônica de comparação:
/// trim + minúsculas + sem acentos + espaços colapsados em `_`.
pub fn normalizar_cabecalho(bruto: &str) -> String {
    let minusculo: String = bruto.trim().to_lowercase().chars().map(sem_acento).collect();
    minusculo
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Remove o acento de um caractere latino (pt-BR)
fn sem_acento(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        _ => c,
    }
}

// ==========================================
// Classificação - modo tabela de frete
// ==========================================

/// Classifica um cabeçalho normalizado como campo da tabela de frete.
///
/// Regras, na ordem (a primeira que casar vence):
/// 1..5) contém "add" + fragmento do tamanho → preço de adicional
/// 6..10) contém fragmento do tamanho (sem "add") → preço de 1º volume
/// 11) igual a "zoneamento" / "cep" / "zona" → zoneamento
/// 12) contém "gris" ou "ad_valorem" → GRIS
/// Nenhuma → coluna ignorada.
pub fn classificar_campo_tabela(chave: &str) -> Option<CampoTabela> {
    use VolumeSize::*;

    // Regras 1..5: adicionais (fragmento "add" presente)
    if chave.contains("add") {
        if chave.contains("extra_grande") {
            return Some(CampoTabela::Add(ExtraGrande));
        }
        if chave.contains("grande") && !chave.contains("extra") {
            return Some(CampoTabela::Add(Grande));
        }
        if chave.contains("media") {
            return Some(CampoTabela::Add(Media));
        }
        if chave.contains("pequena") {
            return Some(CampoTabela::Add(Pequena));
        }
        if chave.contains("micro") {
            return Some(CampoTabela::Add(Micro));
        }
    }

    // Regras 6..10: 1º volume ("extra_grande" antes de "grande")
    if chave.contains("extra_grande") {
        return Some(CampoTabela::Cx(ExtraGrande));
    }
    if chave.contains("grande") && !chave.contains("extra") {
        return Some(CampoTabela::Cx(Grande));
    }
    if chave.contains("media") {
        return Some(CampoTabela::Cx(Media));
    }
    if chave.contains("pequena") {
        return Some(CampoTabela::Cx(Pequena));
    }
    if chave.contains("micro") {
        return Some(CampoTabela::Cx(Micro));
    }

    // Regra 11: zoneamento por igualdade exata de apelido
    if chave == "zoneamento" || chave == "cep" || chave == "zona" {
        return Some(CampoTabela::Zoneamento);
    }

    // Regra 12: GRIS
    if chave.contains("gris") || chave.contains("ad_valorem") {
        return Some(CampoTabela::Gris);
    }

    None
}

// ==========================================
// Classificação - modo lote
// ==========================================

/// Classifica um cabeçalho normalizado como campo do arquivo de lote.
///
/// Regras, na ordem:
/// 1) contém "cte" / "nf" / "nota" → identificador de correlação
/// 2) contém "zoneamento" / "cep" / "zona" → zoneamento
/// 3) contém "gris" ou "ad_valorem" → GRIS manual
/// 4..8) contém fragmento do tamanho → quantidade daquele tamanho
///    (CX, ADD e QTD do mesmo tamanho caem no mesmo campo e são
///    somadas: o total de caixas do embarque é CX + ADD)
/// Nenhuma → coluna de passagem.
pub fn classificar_campo_lote(chave: &str) -> Option<CampoLote> {
    use VolumeSize::*;

    if chave.contains("cte") || chave.contains("nf") || chave.contains("nota") {
        return Some(CampoLote::Cte);
    }
    if chave.contains("zoneamento") || chave.contains("cep") || chave.contains("zona") {
        return Some(CampoLote::Zoneamento);
    }
    if chave.contains("gris") || chave.contains("ad_valorem") {
        return Some(CampoLote::Gris);
    }

    // Tamanhos: "extra_grande" antes de "grande"
    if chave.contains("extra_grande") {
        return Some(CampoLote::Qtd(ExtraGrande));
    }
    if chave.contains("grande") && !chave.contains("extra") {
        return Some(CampoLote::Qtd(Grande));
    }
    if chave.contains("media") {
        return Some(CampoLote::Qtd(Media));
    }
    if chave.contains("pequena") {
        return Some(CampoLote::Qtd(Pequena));
    }
    if chave.contains("micro") {
        return Some(CampoLote::Qtd(Micro));
    }

    None
}

// ==========================================
// Testes unitários (uma regra por teste)
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use VolumeSize::*;

    // ===== Normalização =====

    #[test]
    fn test_normalizar_trim_caixa_espacos() {
        assert_eq!(normalizar_cabecalho("  CX Extra Grande  "), "cx_extra_grande");
        assert_eq!(normalizar_cabecalho("ADD  MICRO"), "add_micro");
    }

    #[test]
    fn test_normalizar_remove_acentos() {
        assert_eq!(normalizar_cabecalho("CX Média"), "cx_media");
        assert_eq!(normalizar_cabecalho("Adição Média"), "adicao_media");
    }

    // ===== Modo tabela: regras de adicional =====

    #[test]
    fn test_tabela_add_extra_grande() {
        assert_eq!(
            classificar_campo_tabela("add_extra_grande"),
            Some(CampoTabela::Add(ExtraGrande))
        );
    }

    #[test]
    fn test_tabela_add_grande_exclui_extra() {
        assert_eq!(
            classificar_campo_tabela("add_grande"),
            Some(CampoTabela::Add(Grande))
        );
    }

    #[test]
    fn test_tabela_add_demais_tamanhos() {
        assert_eq!(classificar_campo_tabela("add_media"), Some(CampoTabela::Add(Media)));
        assert_eq!(
            classificar_campo_tabela("add_pequena"),
            Some(CampoTabela::Add(Pequena))
        );
        assert_eq!(classificar_campo_tabela("add_micro"), Some(CampoTabela::Add(Micro)));
    }

    // ===== Modo tabela: regras de 1º volume =====

    #[test]
    fn test_tabela_cx_extra_grande_antes_de_grande() {
        // Ordem importa: sem a regra 6 antes da 7, EXTRA GRANDE
        // seria classificada como GRANDE
        assert_eq!(
            classificar_campo_tabela("cx_extra_grande"),
            Some(CampoTabela::Cx(ExtraGrande))
        );
        assert_eq!(
            classificar_campo_tabela("cx_grande"),
            Some(CampoTabela::Cx(Grande))
        );
    }

    #[test]
    fn test_tabela_cx_sem_prefixo() {
        // O fragmento do tamanho basta; o prefixo "cx" não é exigido
        assert_eq!(
            classificar_campo_tabela("valor_pequena"),
            Some(CampoTabela::Cx(Pequena))
        );
        assert_eq!(classificar_campo_tabela("micro"), Some(CampoTabela::Cx(Micro)));
    }

    // ===== Modo tabela: zoneamento e GRIS =====

    #[test]
    fn test_tabela_zoneamento_apelidos_exatos() {
        assert_eq!(
            classificar_campo_tabela("zoneamento"),
            Some(CampoTabela::Zoneamento)
        );
        assert_eq!(classificar_campo_tabela("cep"), Some(CampoTabela::Zoneamento));
        assert_eq!(classificar_campo_tabela("zona"), Some(CampoTabela::Zoneamento));
        // No modo tabela o apelido é por igualdade, não por substring
        assert_eq!(classificar_campo_tabela("zona_sul"), None);
    }

    #[test]
    fn test_tabela_gris() {
        assert_eq!(classificar_campo_tabela("gris"), Some(CampoTabela::Gris));
        assert_eq!(
            classificar_campo_tabela("taxa_ad_valorem"),
            Some(CampoTabela::Gris)
        );
    }

    #[test]
    fn test_tabela_coluna_desconhecida() {
        assert_eq!(classificar_campo_tabela("observacao"), None);
    }

    // ===== Modo lote =====

    #[test]
    fn test_lote_cte_apelidos() {
        assert_eq!(classificar_campo_lote("cte"), Some(CampoLote::Cte));
        assert_eq!(classificar_campo_lote("numero_nf"), Some(CampoLote::Cte));
        assert_eq!(classificar_campo_lote("nota_fiscal"), Some(CampoLote::Cte));
    }

    #[test]
    fn test_lote_zoneamento_por_substring() {
        // Diferente do modo tabela, aqui vale substring
        assert_eq!(
            classificar_campo_lote("zoneamento_destino"),
            Some(CampoLote::Zoneamento)
        );
        assert_eq!(classificar_campo_lote("cep"), Some(CampoLote::Zoneamento));
    }

    #[test]
    fn test_lote_gris() {
        assert_eq!(classificar_campo_lote("gris_manual"), Some(CampoLote::Gris));
    }

    #[test]
    fn test_lote_cx_e_add_caem_na_mesma_quantidade() {
        // CX GRANDE e ADD GRANDE alimentam o mesmo total
        assert_eq!(
            classificar_campo_lote("cx_grande"),
            Some(CampoLote::Qtd(Grande))
        );
        assert_eq!(
            classificar_campo_lote("add_grande"),
            Some(CampoLote::Qtd(Grande))
        );
        assert_eq!(
            classificar_campo_lote("qtd_grande"),
            Some(CampoLote::Qtd(Grande))
        );
    }

    #[test]
    fn test_lote_fragmento_sem_prefixo_e_quantidade() {
        assert_eq!(classificar_campo_lote("grande"), Some(CampoLote::Qtd(Grande)));
    }

    #[test]
    fn test_lote_extra_grande_antes_de_grande() {
        assert_eq!(
            classificar_campo_lote("cx_extra_grande"),
            Some(CampoLote::Qtd(ExtraGrande))
        );
    }

    #[test]
    fn test_lote_coluna_de_passagem() {
        assert_eq!(classificar_campo_lote("transportadora"), None);
    }
}

//! Keyword-based category guessing for Brazilian transaction descriptions
//!
//! No LLM involved: a static keyword table covers the common merchants and
//! bills. Matching is on whole words after accent folding, and the longest
//! matching keyword wins so `passagem aerea` beats `passagem`.

/// Categories offered as buttons when nothing matched
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Alimentação",
    "Transporte",
    "Moradia",
    "Saúde",
    "Lazer",
    "Compras",
    "Educação",
];

/// Static keyword table, already lower-case and accent-free
const KEYWORDS: &[(&str, &str)] = &[
    // Transporte
    ("uber", "Transporte"), ("99", "Transporte"), ("indrive", "Transporte"),
    ("taxi", "Transporte"), ("gasolina", "Transporte"), ("etanol", "Transporte"),
    ("diesel", "Transporte"), ("posto", "Transporte"), ("abastecer", "Transporte"),
    ("ipva", "Transporte"), ("licenciamento", "Transporte"), ("pedagio", "Transporte"),
    ("sem parar", "Transporte"), ("veloe", "Transporte"), ("onibus", "Transporte"),
    ("busao", "Transporte"), ("metro", "Transporte"), ("trem", "Transporte"),
    ("passagem", "Transporte"), ("bilhete", "Transporte"), ("estacionamento", "Transporte"),
    ("zona azul", "Transporte"), ("oficina", "Transporte"), ("mecanico", "Transporte"),
    ("pneu", "Transporte"), ("troca de oleo", "Transporte"), ("lavar carro", "Transporte"),
    // Alimentação
    ("mercado", "Alimentação"), ("supermercado", "Alimentação"), ("assai", "Alimentação"),
    ("carrefour", "Alimentação"), ("atacadao", "Alimentação"), ("pao de acucar", "Alimentação"),
    ("padaria", "Alimentação"), ("pao", "Alimentação"), ("leite", "Alimentação"),
    ("cafe", "Alimentação"), ("acougue", "Alimentação"), ("carne", "Alimentação"),
    ("sacolao", "Alimentação"), ("feira", "Alimentação"), ("ifood", "Alimentação"),
    ("rappi", "Alimentação"), ("ze delivery", "Alimentação"), ("delivery", "Alimentação"),
    ("restaurante", "Alimentação"), ("almoco", "Alimentação"), ("jantar", "Alimentação"),
    ("prato", "Alimentação"), ("mcdonalds", "Alimentação"), ("bk", "Alimentação"),
    ("burger king", "Alimentação"), ("pizza", "Alimentação"), ("hamburguer", "Alimentação"),
    ("lanche", "Alimentação"), ("pastel", "Alimentação"), ("coxinha", "Alimentação"),
    ("sorvete", "Alimentação"), ("acai", "Alimentação"), ("chocolate", "Alimentação"),
    ("bomboniere", "Alimentação"), ("cerveja", "Alimentação"), ("breja", "Alimentação"),
    ("vinho", "Alimentação"), ("churrasco", "Alimentação"),
    // Moradia
    ("aluguel", "Moradia"), ("condominio", "Moradia"), ("luz", "Moradia"),
    ("energia", "Moradia"), ("enel", "Moradia"), ("agua", "Moradia"),
    ("sabesp", "Moradia"), ("gas", "Moradia"), ("botijao", "Moradia"),
    ("internet", "Moradia"), ("claro", "Moradia"), ("vivo", "Moradia"),
    ("tim", "Moradia"), ("net", "Moradia"), ("iptu", "Moradia"),
    ("faxina", "Moradia"), ("diarista", "Moradia"), ("obra", "Moradia"),
    ("reforma", "Moradia"), ("material de construcao", "Moradia"), ("leroy", "Moradia"),
    ("telhanorte", "Moradia"),
    // Saúde
    ("farmacia", "Saúde"), ("drogasil", "Saúde"), ("drogaria", "Saúde"),
    ("remedio", "Saúde"), ("medicamento", "Saúde"), ("medico", "Saúde"),
    ("consulta", "Saúde"), ("exame", "Saúde"), ("dentista", "Saúde"),
    ("psicologo", "Saúde"), ("terapia", "Saúde"), ("convenio", "Saúde"),
    ("plano de saude", "Saúde"), ("hospital", "Saúde"), ("academia", "Saúde"),
    ("smartfit", "Saúde"), ("bluefit", "Saúde"), ("suplemento", "Saúde"),
    ("whey", "Saúde"), ("creatina", "Saúde"),
    // Lazer
    ("cinema", "Lazer"), ("ingresso", "Lazer"), ("show", "Lazer"),
    ("teatro", "Lazer"), ("netflix", "Lazer"), ("spotify", "Lazer"),
    ("amazon prime", "Lazer"), ("disney", "Lazer"), ("hbo", "Lazer"),
    ("globoplay", "Lazer"), ("jogo", "Lazer"), ("game", "Lazer"),
    ("steam", "Lazer"), ("playstation", "Lazer"), ("xbox", "Lazer"),
    ("bar", "Lazer"), ("balada", "Lazer"), ("festa", "Lazer"),
    ("role", "Lazer"), ("viagem", "Lazer"), ("passagem aerea", "Lazer"),
    ("hotel", "Lazer"), ("airbnb", "Lazer"), ("booking", "Lazer"),
    // Compras
    ("shopping", "Compras"), ("roupa", "Compras"), ("camisa", "Compras"),
    ("calca", "Compras"), ("tenis", "Compras"), ("sapato", "Compras"),
    ("shein", "Compras"), ("shopee", "Compras"), ("mercadolivre", "Compras"),
    ("mercado livre", "Compras"), ("amazon", "Compras"), ("magalu", "Compras"),
    ("presente", "Compras"), ("perfume", "Compras"), ("boticario", "Compras"),
    ("cosmetico", "Compras"),
    // Cuidados Pessoais
    ("cabelo", "Cuidados Pessoais"), ("cabeleireiro", "Cuidados Pessoais"),
    ("barbeiro", "Cuidados Pessoais"), ("manicure", "Cuidados Pessoais"),
    ("unha", "Cuidados Pessoais"), ("depilacao", "Cuidados Pessoais"),
    // Educação
    ("curso", "Educação"), ("faculdade", "Educação"), ("escola", "Educação"),
    ("mensalidade", "Educação"), ("livro", "Educação"), ("papelaria", "Educação"),
    ("xerox", "Educação"), ("ebac", "Educação"), ("udemy", "Educação"),
    ("alura", "Educação"),
    // Financeiro
    ("cartao", "Pagamentos"), ("fatura", "Pagamentos"), ("emprestimo", "Pagamentos"),
    ("taxa", "Pagamentos"), ("banco", "Pagamentos"), ("tarifa", "Pagamentos"),
    ("seguro", "Pagamentos"),
    ("salario", "Salário"), ("pagamento", "Salário"), ("adiantamento", "Salário"),
    ("13", "Salário"), ("ferias", "Salário"),
    ("pix", "Transferência"), ("transferencia", "Transferência"),
    ("freela", "Renda Extra"), ("freelance", "Renda Extra"), ("venda", "Renda Extra"),
];

/// Guess a category name for a free-text description
pub fn guess_category(description: &str) -> Option<&'static str> {
    let haystack = format!(" {} ", normalize(description));

    KEYWORDS
        .iter()
        .filter(|(keyword, _)| haystack.contains(&format!(" {} ", keyword)))
        .max_by_key(|(keyword, _)| keyword.len())
        .map(|(_, category)| *category)
}

/// Every category name the keyword table can produce, button defaults first
pub fn known_categories() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = DEFAULT_CATEGORIES.to_vec();
    for (_, name) in KEYWORDS {
        if !names.contains(name) {
            names.push(name);
        }
    }
    names
}

/// Lower-case, fold Portuguese accents and collapse punctuation into single spaces
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            c if c.is_alphanumeric() => c,
            _ => ' ',
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case- and accent-insensitive name comparison
pub fn same_name(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

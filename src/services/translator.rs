//! Best-effort translation of dynamic text
//!
//! Event titles, descriptions and venue names come from the provider
//! in English. When the site runs in Portuguese, this module rewrites
//! them through a dictionary of known church terms: exact whole-string
//! match first, then case-insensitive whole-word substitution with the
//! longest phrases tried first ("Youth Service" must win over
//! "Service"). English input passes through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use super::locale::Lang;

/// Known church terms, English → Portuguese. Order in this table is
/// irrelevant; matching is by descending key length.
pub const CHURCH_TERMS: &[(&str, &str)] = &[
    // Categories & event types
    ("National Youth Conference", "Conferência Nacional de Jovens"),
    ("National Women's Conference", "Conferência Nacional de Mulheres"),
    ("National Men's Conference", "Conferência Nacional de Homens"),
    ("Youth Conference", "Conferência de Jovens"),
    ("Deeper Life Conference", "Conferência Vida Profunda"),
    ("All Zones Deeperlife", "Vida Profunda de Todas as Zonas"),
    ("All Zones Deeper Life", "Vida Profunda de Todas as Zonas"),
    ("Deeper Life", "Vida Profunda"),
    ("Women's Conference", "Conferência de Mulheres"),
    ("Men's Conference", "Conferência de Homens"),
    ("National Conference", "Conferência Nacional"),
    ("National Youth Service", "Culto Nacional de Jovens"),
    ("Youth Service", "Culto de Jovens"),
    ("Worship Service", "Culto de Adoração"),
    ("Prayer Meeting", "Reunião de Oração"),
    ("Bible Study", "Estudo Bíblico"),
    ("Leadership Summit", "Cúpula de Liderança"),
    ("Leadership Training", "Treinamento de Liderança"),
    ("Men's Ministry", "Ministério de Homens"),
    ("Women's Ministry", "Ministério de Mulheres"),
    ("Children's Ministry", "Ministério Infantil"),
    ("Couples Ministry", "Ministério de Casais"),
    ("Youth Ministry", "Ministério de Jovens"),
    ("Worship Team", "Equipe de Louvor"),
    ("Usher Team", "Equipe de Recepcionistas"),
    ("Pastoral Care", "Cuidado Pastoral"),
    ("Holy Communion", "Santa Ceia"),
    ("New Year's Eve", "Véspera de Ano Novo"),
    ("Christmas Service", "Culto de Natal"),
    ("Easter Service", "Culto de Páscoa"),
    ("Thanksgiving Service", "Culto de Ação de Graças"),
    ("Mission Trip", "Viagem Missionária"),
    ("Outreach Event", "Evento de Evangelismo"),
    ("Community Service", "Serviço Comunitário"),
    ("Food Drive", "Distribuição de Alimentos"),
    ("Youth Camp", "Acampamento de Jovens"),
    ("Summer Camp", "Acampamento de Verão"),
    ("Winter Retreat", "Retiro de Inverno"),
    ("Men's Breakfast", "Café da Manhã dos Homens"),
    ("Women's Tea", "Chá das Mulheres"),
    ("General Assembly", "Assembleia Geral"),
    ("Annual Meeting", "Reunião Anual"),
    ("Board Meeting", "Reunião da Diretoria"),
    ("Staff Meeting", "Reunião da Equipe"),
    ("Volunteer Appreciation", "Apreciação dos Voluntários"),
    ("Guest Speaker", "Palestrante Convidado"),
    ("Special Event", "Evento Especial"),
    ("Fundraiser", "Angariação de Fundos"),
    ("Concert", "Concerto"),
    ("Festival", "Festival"),
    ("Workshop", "Workshop"),
    ("Seminar", "Seminário"),
    ("Class", "Aula"),
    ("Course", "Curso"),
    // Common phrases (descriptions)
    ("Join us for the", "Junte-se a nós para a"),
    ("Join us for a", "Junte-se a nós para um"),
    ("Join us for", "Junte-se a nós para"),
    ("We invite you to the", "Convidamos você para a"),
    ("We invite you to", "Convidamos você para"),
    ("will be held at", "será realizado em"),
    ("taking place at", "acontecendo em"),
    ("located at", "localizado em"),
    ("starts at", "começa às"),
    ("beginning at", "começando às"),
    ("doors open at", "portas abrem às"),
    ("hosted by", "organizado por"),
    ("guest speaker", "palestrante convidado"),
    ("guest artist", "artista convidado"),
    ("special guest", "convidado especial"),
    ("open to all", "aberto a todos"),
    ("admission is free", "entrada livre"),
    ("free admission", "entrada gratuita"),
    ("bring a friend", "traga um amigo"),
    ("invite your friends", "convide seus amigos"),
    ("come and be blessed", "venha e seja abençoado"),
    ("a time of", "um tempo de"),
    ("a night of", "uma noite de"),
    ("a day of", "um dia de"),
    ("don't miss out", "não perca"),
    ("save the date", "reserve a data"),
    ("more info", "mais informações"),
    ("contact us", "contacte-nos"),
    ("for more details", "para mais detalhes"),
    ("register now", "registre-se agora"),
    ("sign up", "inscreva-se"),
    // Single terms (fallback)
    ("Youth", "Jovens"),
    ("Service", "Culto"),
    ("Worship", "Adoração"),
    ("Training", "Treinamento"),
    ("Conference", "Conferência"),
    ("National", "Nacional"),
    ("Meeting", "Reunião"),
    ("Prayer", "Oração"),
    ("Leadership", "Liderança"),
    ("Outreach", "Evangelismo"),
    ("Convention", "Convenção"),
    ("Retreat", "Retiro"),
    ("Camp", "Acampamento"),
    ("Dedication", "Dedicação"),
    ("Baptism", "Batismo"),
    ("Communion", "Santa Ceia"),
    ("Thanksgiving", "Ação de Graças"),
    ("Christmas", "Natal"),
    ("Easter", "Páscoa"),
    ("New Year", "Ano Novo"),
    ("Vigil", "Vigília"),
    ("Fast", "Jejum"),
    ("School", "Escola"),
    ("Ministry", "Ministério"),
    ("Family", "Família"),
    ("Couples", "Casais"),
    ("Singles", "Solteiros"),
    ("Seniors", "Idosos"),
    ("Pastors", "Pastores"),
    ("Pastor", "Pastor"),
    ("Leaders", "Líderes"),
    ("Deacons", "Diáconos"),
    ("Elders", "Presbíteros"),
    ("Members", "Membros"),
    ("Assembly", "Assembleia"),
    ("Gala", "Gala"),
    ("Dinner", "Jantar"),
    ("Lunch", "Almoço"),
    ("Breakfast", "Café da Manhã"),
    ("Plan", "Plano"),
    ("Launch", "Lançamento"),
    ("Ceremony", "Cerimônia"),
    ("Celebration", "Celebração"),
    ("Anniversary", "Aniversário"),
    ("Birthday", "Aniversário"),
    ("Wedding", "Casamento"),
    ("Funeral", "Funeral"),
    ("Memorial", "Memorial"),
    ("Location", "Localização"),
    ("TBA", "A definir"),
    ("Online", "Online"),
    ("Zoom", "Zoom"),
    ("Live", "Ao Vivo"),
    ("Stream", "Transmissão"),
    ("All", "Todos"),
    ("General", "Geral"),
    ("Zones", "Zonas"),
    ("Zone", "Zona"),
    // Venues
    ("Malhazine Conference Centre", "Centro de Conferências de Malhazine"),
    ("Malhazine Conference Center", "Centro de Conferências de Malhazine"),
    ("Conference Centre", "Centro de Conferências"),
    ("Conference Center", "Centro de Conferências"),
    ("Main Church", "Igreja Sede"),
    ("Headquarters", "Sede"),
    ("Auditorium", "Auditório"),
    ("Main Hall", "Salão Principal"),
    ("Room", "Sala"),
];

/// Compiled substitution rules, longest source phrase first so
/// multi-word terms win over their fragments.
static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let mut terms: Vec<&(&str, &str)> = CHURCH_TERMS.iter().collect();
    terms.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    terms
        .into_iter()
        .map(|(term, replacement)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
            // The pattern is built from a static table of plain words;
            // compilation cannot fail for any entry in it.
            (Regex::new(&pattern).expect("invalid term pattern"), *replacement)
        })
        .collect()
});

/// Translate a server-authored English string for the active locale.
/// Identity for English; best-effort dictionary substitution for
/// Portuguese.
pub fn translate_dynamic(text: &str, lang: Lang) -> String {
    if lang != Lang::Pt || text.is_empty() {
        return text.to_string();
    }

    // Exact whole-string match wins outright.
    if let Some((_, replacement)) = CHURCH_TERMS.iter().find(|(term, _)| *term == text) {
        return (*replacement).to_string();
    }

    let mut translated = text.to_string();
    for (pattern, replacement) in RULES.iter() {
        if pattern.is_match(&translated) {
            translated = pattern.replace_all(&translated, *replacement).into_owned();
        }
    }
    translated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_is_identity() {
        let text = "National Youth Conference";
        assert_eq!(translate_dynamic(text, Lang::En), text);
    }

    #[test]
    fn test_exact_match_first() {
        assert_eq!(
            translate_dynamic("National Youth Conference", Lang::Pt),
            "Conferência Nacional de Jovens"
        );
    }

    #[test]
    fn test_longest_phrase_wins() {
        // "Youth Service" must translate as a unit, not word by word.
        assert_eq!(
            translate_dynamic("Annual Youth Service at the Auditorium", Lang::Pt),
            "Annual Culto de Jovens at the Auditório"
        );
    }

    #[test]
    fn test_case_insensitive_whole_word() {
        assert_eq!(translate_dynamic("YOUTH camp", Lang::Pt), "Acampamento de Jovens");
        // "Class" inside another word must not match.
        assert_eq!(translate_dynamic("Classic", Lang::Pt), "Classic");
    }

    #[test]
    fn test_unknown_text_passes_through() {
        assert_eq!(translate_dynamic("Zumba evening", Lang::Pt), "Zumba evening");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(translate_dynamic("", Lang::Pt), "");
    }

    #[test]
    fn test_phrase_substitution_in_description() {
        let text = "Join us for a night of worship, doors open at 18h";
        let translated = translate_dynamic(text, Lang::Pt);
        assert!(translated.contains("Junte-se a nós para"), "{}", translated);
        assert!(translated.contains("portas abrem às"), "{}", translated);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Identity law: the English locale never rewrites anything.
        #[test]
        fn property_english_identity(text in ".{0,80}") {
            prop_assert_eq!(translate_dynamic(&text, Lang::En), text);
        }

        /// Translation is total: any input yields some output without
        /// panicking, and non-Portuguese-relevant input is unchanged.
        #[test]
        fn property_translation_total(text in "[a-z0-9 ]{0,60}") {
            let _ = translate_dynamic(&text, Lang::Pt);
        }
    }
}

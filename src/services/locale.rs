//! Static UI translations
//!
//! Two locales, English and Portuguese, as nested key→string bundles
//! with dot-path lookup (`nav.home`). Missing keys are not errors: the
//! lookup returns the key itself and logs a warning, so a typo shows
//! up on the page instead of taking it down. Whole bundles are handed
//! to the templates so markup reads `{{ t.nav.home }}`.
//!
//! Dynamic, server-authored text goes through
//! `services::translator` instead.

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Active UI language, chosen by the `lang` cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// English (default)
    #[default]
    En,
    /// Portuguese
    Pt,
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::En => write!(f, "en"),
            Lang::Pt => write!(f, "pt"),
        }
    }
}

impl FromStr for Lang {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "pt" => Ok(Lang::Pt),
            _ => Err(anyhow::anyhow!("Unsupported language: {}", s)),
        }
    }
}

impl Lang {
    /// Localized month names, January first.
    pub fn month_names(&self) -> [&'static str; 12] {
        match self {
            Lang::En => [
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ],
            Lang::Pt => [
                "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto",
                "Setembro", "Outubro", "Novembro", "Dezembro",
            ],
        }
    }

    /// Localized short weekday names, Sunday first.
    pub fn weekday_names(&self) -> [&'static str; 7] {
        match self {
            Lang::En => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            Lang::Pt => ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"],
        }
    }
}

static EN: Lazy<Value> = Lazy::new(|| {
    json!({
        "nav": {
            "home": "Home",
            "locations": "Locations",
            "events": "Events",
            "updates": "Updates",
            "history": "Our History",
            "about": "About Us",
            "faq": "FAQ",
            "prayerWall": "Prayer Wall",
            "counselling": "Counselling",
            "contact": "Contact",
            "receiveJesus": "Receive Jesus",
            "sessionExpired": "Your session expired after inactivity. Please sign in again."
        },
        "hero": {
            "badge": "Guided by the Holy Spirit",
            "title": "Forward in Faith",
            "subtitle": "African Assembly of God - Spreading the Gospel across Mozambique and beyond",
            "btnReceive": "Receive Jesus",
            "btnLocations": "Find a Location",
            "statChurches": "Churches",
            "statMembers": "Members",
            "statProvinces": "Provinces",
            "statYears": "Years of Ministry"
        },
        "events": {
            "upcoming": "Upcoming",
            "nationalPlan": "National Events Plan",
            "nationalPlanDesc": "Conferences, trainings and gatherings across every province.",
            "searchPlaceholder": "Search events...",
            "listView": "List",
            "calendarView": "Calendar",
            "pastEvents": "Past Events",
            "noUpcoming": "No events found.",
            "noEventsOnDate": "No events scheduled for this date.",
            "more": "more",
            "location": "Location",
            "categories": {
                "all": "All",
                "conferences": "Conferences",
                "executive": "Executive",
                "seminars": "Seminars",
                "training": "Training",
                "workshops": "Workshops",
                "youth": "Youth"
            }
        },
        "locations": {
            "title": "Find an Assembly Near You",
            "subtitle": "Connect with a local church family for worship, fellowship, and spiritual growth.",
            "searchPlaceholder": "Search by pastor, church, phone, address, or coordinates...",
            "allProvinces": "All Provinces",
            "churches": "churches",
            "noResults": "No locations found matching your criteria.",
            "clearFilters": "Clear filters",
            "addressUnavailable": "Address not available",
            "nearest": "Nearest to you",
            "kmAway": "km away"
        },
        "prayerWall": {
            "heroTitle": "Shared Burdens, Shared Faith",
            "shareRequest": "Share a Prayer Request",
            "shareSubtitle": "Your request will appear on the wall once it has been reviewed.",
            "namePlaceholder": "Your name (or leave blank for Anonymous)",
            "categoryLabel": "Category",
            "yourRequestLabel": "Your Request",
            "requestPlaceholder": "Share what's on your heart...",
            "submitButton": "Submit Request",
            "prayed": "prayed",
            "submitted": "Thank you. Your request will appear once approved.",
            "all": "All"
        },
        "history": {
            "title": "Our History",
            "subtitle": "Decades of faith, growth and ministry across Mozambique."
        },
        "faq": {
            "title": "Frequently Asked Questions",
            "subtitle": "Answers about our services, membership and beliefs.",
            "searchPlaceholder": "Search questions...",
            "all": "All",
            "noResults": "No questions match your search."
        },
        "updates": {
            "title": "News & Updates",
            "subtitle": "Announcements, newsletters and galleries from our teams.",
            "searchPlaceholder": "Search updates...",
            "all": "All",
            "recentNews": "Recent News",
            "noResults": "No updates found."
        },
        "counselling": {
            "title": "Pastoral Counselling",
            "subtitle": "Confidential support from our pastoral team.",
            "privacyTitle": "Your Privacy Matters",
            "privacyBody": "Your information is kept strictly confidential and will only be used to connect you with a counsellor.",
            "submit": "Submit Request",
            "submitted": "Your request has been submitted. A member of our pastoral team will contact you shortly.",
            "messageTooShort": "Please describe your situation in at least 10 characters.",
            "supportTypeRequired": "Please choose the type of support you need."
        },
        "receiveJesus": {
            "title": "Receive Jesus Today",
            "subtitle": "The most important decision you will ever make.",
            "formTitle": "Your Information",
            "prayerTitle": "Prayer of Salvation",
            "welcome": "Welcome to the Family!",
            "submit": "I Have Decided"
        },
        "contact": {
            "title": "Contact Us",
            "nameLabel": "Name",
            "optional": "Optional"
        },
        "footer": {
            "tagline": "Spreading the Gospel across Mozambique and beyond.",
            "quickLinks": "Quick Links",
            "contact": "Contact Info",
            "rights": "All rights reserved."
        }
    })
});

static PT: Lazy<Value> = Lazy::new(|| {
    json!({
        "nav": {
            "home": "Início",
            "locations": "Localizações",
            "events": "Eventos",
            "updates": "Atualizações",
            "history": "Nossa História",
            "about": "Sobre Nós",
            "faq": "Perguntas Frequentes",
            "prayerWall": "Mural de Oração",
            "counselling": "Aconselhamento",
            "contact": "Contacto",
            "receiveJesus": "Aceitar Jesus",
            "sessionExpired": "A sua sessão expirou por inatividade. Por favor entre novamente."
        },
        "hero": {
            "badge": "Guiada pelo Espírito Santo",
            "title": "Avante na Fé",
            "subtitle": "Assembleia de Deus Africana - Espalhando o Evangelho por Moçambique e além",
            "btnReceive": "Aceitar Jesus",
            "btnLocations": "Encontrar Igreja",
            "statChurches": "Igrejas",
            "statMembers": "Membros",
            "statProvinces": "Províncias",
            "statYears": "Anos de Ministério"
        },
        "events": {
            "upcoming": "Próximos",
            "nationalPlan": "Plano Nacional de Eventos",
            "nationalPlanDesc": "Conferências, treinamentos e encontros em todas as províncias.",
            "searchPlaceholder": "Pesquisar eventos...",
            "listView": "Lista",
            "calendarView": "Calendário",
            "pastEvents": "Eventos Passados",
            "noUpcoming": "Nenhum evento encontrado.",
            "noEventsOnDate": "Nenhum evento agendado para esta data.",
            "more": "mais",
            "location": "Localização",
            "categories": {
                "all": "Todos",
                "conferences": "Conferências",
                "executive": "Executivo",
                "seminars": "Seminários",
                "training": "Treinamento",
                "workshops": "Workshops",
                "youth": "Jovens"
            }
        },
        "locations": {
            "title": "Encontre uma Assembleia Perto de Si",
            "subtitle": "Conecte-se com uma família de fé local para adoração, comunhão e crescimento espiritual.",
            "searchPlaceholder": "Pesquise por pastor, igreja, telefone, endereço ou coordenadas...",
            "allProvinces": "Todas as Províncias",
            "churches": "igrejas",
            "noResults": "Nenhuma localização corresponde aos seus critérios.",
            "clearFilters": "Limpar filtros",
            "addressUnavailable": "Endereço não disponível",
            "nearest": "Mais perto de si",
            "kmAway": "km de distância"
        },
        "prayerWall": {
            "heroTitle": "Fardos Partilhados, Fé Partilhada",
            "shareRequest": "Partilhar um Pedido de Oração",
            "shareSubtitle": "O seu pedido aparecerá no mural depois de ser revisto.",
            "namePlaceholder": "O seu nome (ou deixe em branco para Anónimo)",
            "categoryLabel": "Categoria",
            "yourRequestLabel": "O Seu Pedido",
            "requestPlaceholder": "Partilhe o que está no seu coração...",
            "submitButton": "Enviar Pedido",
            "prayed": "oraram",
            "submitted": "Obrigado. O seu pedido aparecerá depois de aprovado.",
            "all": "Todos"
        },
        "history": {
            "title": "Nossa História",
            "subtitle": "Décadas de fé, crescimento e ministério em Moçambique."
        },
        "faq": {
            "title": "Perguntas Frequentes",
            "subtitle": "Respostas sobre os nossos cultos, membresia e crenças.",
            "searchPlaceholder": "Pesquisar perguntas...",
            "all": "Todas",
            "noResults": "Nenhuma pergunta corresponde à sua pesquisa."
        },
        "updates": {
            "title": "Notícias e Atualizações",
            "subtitle": "Anúncios, boletins e galerias das nossas equipas.",
            "searchPlaceholder": "Pesquisar atualizações...",
            "all": "Todas",
            "recentNews": "Notícias Recentes",
            "noResults": "Nenhuma atualização encontrada."
        },
        "counselling": {
            "title": "Aconselhamento Pastoral",
            "subtitle": "Apoio confidencial da nossa equipa pastoral.",
            "privacyTitle": "A Sua Privacidade Importa",
            "privacyBody": "As suas informações são estritamente confidenciais e serão usadas apenas para o conectar com um conselheiro.",
            "submit": "Enviar Pedido",
            "submitted": "O seu pedido foi enviado. Um membro da nossa equipa pastoral entrará em contacto em breve.",
            "messageTooShort": "Por favor descreva a sua situação em pelo menos 10 caracteres.",
            "supportTypeRequired": "Por favor escolha o tipo de apoio de que precisa."
        },
        "receiveJesus": {
            "title": "Aceite Jesus Hoje",
            "subtitle": "A decisão mais importante que alguma vez tomará.",
            "formTitle": "As Suas Informações",
            "prayerTitle": "Oração de Salvação",
            "welcome": "Bem-vindo à Família!",
            "submit": "Eu Decidi"
        },
        "contact": {
            "title": "Contacte-nos",
            "nameLabel": "Nome",
            "optional": "Opcional"
        },
        "footer": {
            "tagline": "Espalhando o Evangelho por Moçambique e além.",
            "quickLinks": "Links Rápidos",
            "contact": "Contactos",
            "rights": "Todos os direitos reservados."
        }
    })
});

/// The whole bundle for a locale, for template contexts.
pub fn bundle(lang: Lang) -> &'static Value {
    match lang {
        Lang::En => &EN,
        Lang::Pt => &PT,
    }
}

/// Dot-path lookup into the active bundle. A missing key returns the
/// key itself and logs a warning.
pub fn t(lang: Lang, key: &str) -> String {
    let mut node = bundle(lang);
    for part in key.split('.') {
        match node.get(part) {
            Some(next) => node = next,
            None => {
                tracing::warn!(%lang, key, "missing translation key");
                return key.to_string();
            }
        }
    }
    match node.as_str() {
        Some(s) => s.to_string(),
        None => {
            tracing::warn!(%lang, key, "translation key resolves to a non-string node");
            key.to_string()
        }
    }
}

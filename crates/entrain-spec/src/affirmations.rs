//! Multilingual affirmation phrases for the whisper voice.

use std::str::FromStr;

/// Affirmation language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    French,
    English,
    Spanish,
    German,
    Italian,
    Portuguese,
    Japanese,
    Chinese,
    /// Sanskrit mantras.
    Sanskrit,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::French,
        Language::English,
        Language::Spanish,
        Language::German,
        Language::Italian,
        Language::Portuguese,
        Language::Japanese,
        Language::Chinese,
        Language::Sanskrit,
    ];

    /// Two-letter language code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::French => "fr",
            Language::English => "en",
            Language::Spanish => "es",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Japanese => "ja",
            Language::Chinese => "zh",
            Language::Sanskrit => "sa",
        }
    }

    /// Resolves a language code, falling back to French for unknown codes.
    pub fn from_code_or_default(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }

    fn table(&self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            Language::French => FR,
            Language::English => EN,
            Language::Spanish => ES,
            Language::German => DE,
            Language::Italian => IT,
            Language::Portuguese => PT,
            Language::Japanese => JA,
            Language::Chinese => ZH,
            Language::Sanskrit => SA,
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown language code '{}'", s))
    }
}

/// Returns the affirmations for `key` in `lang`.
///
/// Keys missing from a language fall back to that language's `meditation`
/// phrases; an empty slice is returned only if both are absent.
pub fn affirmations(key: &str, lang: Language) -> &'static [&'static str] {
    let table = lang.table();
    lookup(table, key)
        .or_else(|| lookup(table, "meditation"))
        .unwrap_or(&[])
}

fn lookup(
    table: &'static [(&'static str, &'static [&'static str])],
    key: &str,
) -> Option<&'static [&'static str]> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

const FR: &[(&str, &[&str])] = &[
    ("sleep", &["je me laisse aller au sommeil", "mon corps se régénère", "je suis en paix profonde", "le sommeil me guérit"]),
    ("healing", &["mon corps sait guérir", "la guérison coule en moi", "chaque souffle me renouvelle", "je me répare"]),
    ("release", &["je lâche tout contrôle", "je fais confiance à la vie", "tout est parfait ainsi", "je libère"]),
    ("meditation", &["tu es aimé", "tu es en sécurité", "tout est bien", "je suis présent", "paix intérieure"]),
    ("creativity", &["les idées coulent librement", "je suis un canal créatif", "mon imagination est infinie"]),
    ("intuition", &["je fais confiance à mon intuition", "ma sagesse intérieure me guide", "je sais"]),
    ("walking", &["chaque pas est une prière", "je marche en conscience", "la terre me porte"]),
    ("relax", &["je me détends profondément", "mon corps est léger", "la paix m'habite"]),
    ("learning", &["j'absorbe facilement", "ma mémoire est excellente", "apprendre est un plaisir"]),
    ("antistress", &["le stress me quitte", "je choisis la paix", "tout va bien se passer"]),
    ("morning", &["je m'éveille en douceur", "cette journée sera belle", "gratitude pour ce nouveau jour"]),
    ("focus", &["je suis totalement concentré", "mon attention est laser", "je suis dans le flow"]),
    ("work", &["j'avance efficacement", "les solutions viennent à moi", "je maîtrise mon sujet"]),
    ("energy", &["l'énergie coule en moi", "je suis vivant et fort", "je peux tout accomplir"]),
    ("confidence", &["je crois en moi", "j'ose et je réussis", "je mérite le succès"]),
    ("insight", &["la clarté m'envahit", "les connexions se révèlent", "tout fait sens"]),
    ("transcend", &["je suis un avec le tout", "les limites se dissolvent", "amour universel"]),
    ("problem", &["les réponses émergent", "mon esprit synthétise", "la solution apparaît"]),
    ("peak", &["je suis à mon maximum", "l'excellence est mon état naturel", "je transcende mes limites"]),
];

const EN: &[(&str, &[&str])] = &[
    ("sleep", &["I let myself drift to sleep", "my body regenerates", "I am in deep peace", "sleep heals me"]),
    ("healing", &["my body knows how to heal", "healing flows through me", "each breath renews me", "I am healing"]),
    ("release", &["I release all control", "I trust life", "everything is perfect as it is", "I let go"]),
    ("meditation", &["you are loved", "you are safe", "all is well", "I am present", "inner peace"]),
    ("creativity", &["ideas flow freely", "I am a creative channel", "my imagination is infinite"]),
    ("intuition", &["I trust my intuition", "my inner wisdom guides me", "I know"]),
    ("walking", &["each step is a prayer", "I walk in awareness", "the earth supports me"]),
    ("relax", &["I relax deeply", "my body is light", "peace dwells in me"]),
    ("learning", &["I absorb easily", "my memory is excellent", "learning is a joy"]),
    ("antistress", &["stress leaves me", "I choose peace", "everything will be fine"]),
    ("morning", &["I awaken gently", "this day will be beautiful", "gratitude for this new day"]),
    ("focus", &["I am fully focused", "my attention is laser sharp", "I am in the flow"]),
    ("work", &["I progress efficiently", "solutions come to me", "I master my subject"]),
    ("energy", &["energy flows through me", "I am alive and strong", "I can accomplish anything"]),
    ("confidence", &["I believe in myself", "I dare and succeed", "I deserve success"]),
    ("insight", &["clarity washes over me", "connections reveal themselves", "everything makes sense"]),
    ("transcend", &["I am one with everything", "boundaries dissolve", "universal love"]),
    ("problem", &["answers emerge", "my mind synthesizes", "the solution appears"]),
    ("peak", &["I am at my peak", "excellence is my natural state", "I transcend my limits"]),
];

const ES: &[(&str, &[&str])] = &[
    ("sleep", &["me dejo llevar al sueño", "mi cuerpo se regenera", "estoy en paz profunda"]),
    ("healing", &["mi cuerpo sabe sanar", "la sanación fluye en mí", "cada respiración me renueva"]),
    ("release", &["suelto todo control", "confío en la vida", "todo es perfecto así"]),
    ("meditation", &["eres amado", "estás seguro", "todo está bien", "estoy presente"]),
    ("creativity", &["las ideas fluyen libremente", "soy un canal creativo"]),
    ("intuition", &["confío en mi intuición", "mi sabiduría interior me guía"]),
    ("walking", &["cada paso es una oración", "camino con consciencia"]),
    ("relax", &["me relajo profundamente", "mi cuerpo está ligero"]),
    ("learning", &["absorbo fácilmente", "mi memoria es excelente"]),
    ("antistress", &["el estrés me abandona", "elijo la paz"]),
    ("morning", &["despierto suavemente", "este día será hermoso"]),
    ("focus", &["estoy totalmente concentrado", "mi atención es precisa"]),
    ("work", &["avanzo eficientemente", "las soluciones vienen a mí"]),
    ("energy", &["la energía fluye en mí", "estoy vivo y fuerte"]),
    ("confidence", &["creo en mí", "me atrevo y triunfo"]),
    ("insight", &["la claridad me invade", "las conexiones se revelan"]),
    ("transcend", &["soy uno con todo", "los límites se disuelven"]),
    ("problem", &["las respuestas emergen", "mi mente sintetiza"]),
    ("peak", &["estoy en mi máximo", "la excelencia es mi estado natural"]),
];

const DE: &[(&str, &[&str])] = &[
    ("sleep", &["ich lasse mich in den Schlaf gleiten", "mein Körper regeneriert sich", "ich bin in tiefem Frieden"]),
    ("healing", &["mein Körper weiß zu heilen", "Heilung fließt durch mich"]),
    ("meditation", &["du bist geliebt", "du bist sicher", "alles ist gut", "ich bin präsent"]),
    ("creativity", &["Ideen fließen frei", "ich bin ein kreativer Kanal"]),
    ("focus", &["ich bin voll konzentriert", "meine Aufmerksamkeit ist scharf"]),
    ("energy", &["Energie fließt durch mich", "ich bin lebendig und stark"]),
    ("confidence", &["ich glaube an mich", "ich wage und gewinne"]),
];

const IT: &[(&str, &[&str])] = &[
    ("sleep", &["mi lascio andare al sonno", "il mio corpo si rigenera", "sono in pace profonda"]),
    ("meditation", &["sei amato", "sei al sicuro", "tutto va bene", "sono presente"]),
    ("creativity", &["le idee fluiscono liberamente", "sono un canale creativo"]),
    ("focus", &["sono totalmente concentrato", "la mia attenzione è precisa"]),
];

const PT: &[(&str, &[&str])] = &[
    ("sleep", &["me deixo ir para o sono", "meu corpo se regenera", "estou em paz profunda"]),
    ("meditation", &["você é amado", "você está seguro", "tudo está bem", "estou presente"]),
    ("creativity", &["as ideias fluem livremente", "sou um canal criativo"]),
    ("focus", &["estou totalmente focado", "minha atenção é precisa"]),
];

const JA: &[(&str, &[&str])] = &[
    ("sleep", &["眠りに身を委ねる", "体が再生する", "深い平和の中にいる"]),
    ("meditation", &["愛されている", "安全である", "すべてが良い", "今ここにいる"]),
    ("creativity", &["アイデアが自由に流れる", "創造の器である"]),
    ("focus", &["完全に集中している", "注意は鋭い"]),
];

const ZH: &[(&str, &[&str])] = &[
    ("sleep", &["我让自己进入睡眠", "我的身体在再生", "我处于深深的平静中"]),
    ("meditation", &["你是被爱的", "你是安全的", "一切都好", "我在当下"]),
    ("creativity", &["思想自由流动", "我是创造的通道"]),
    ("focus", &["我完全专注", "我的注意力如激光般敏锐"]),
];

const SA: &[(&str, &[&str])] = &[
    ("sleep", &["ॐ शान्ति", "नमो अमिताभ"]),
    ("meditation", &["ॐ मणि पद्मे हूँ", "सो हम्", "ॐ", "शान्ति शान्ति शान्ति"]),
    ("creativity", &["सरस्वती नमः", "ॐ गं गणपतये नमः"]),
    ("healing", &["ॐ भेषज्ये नमः", "ॐ त्र्यम्बकं यजामहे"]),
    ("transcend", &["तत् त्वम् असि", "अहम् ब्रह्मास्मि", "सर्वं खल्विदं ब्रह्म"]),
];

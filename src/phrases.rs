//! Static phrase tables: known disaster vocabulary resolved without any
//! network call.
//!
//! Covers the curated epicenter/region names, JMA seismic intensity labels,
//! tsunami warning levels and a handful of fixed alert sentences, each bound
//! to all 16 languages when the table is first built. Lookup is exact-match
//! only; a miss returns `None` and signals the caller to fall through to the
//! cache/AI tiers.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::language::Language;

/// How a curated location name is rendered in the languages that are
/// derived from per-kind sentence patterns rather than hand-curated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocationKind {
    /// Inland region: 石狩地方 → "Ishikari Region" / "Région de Ishikari"
    Region,
    /// Offshore of a prefecture: 福島県沖 → "Off the coast of ..." / "Au large de ..."
    OffCoast,
    /// Bay: 駿河湾 → "Suruga Bay" / "Baie de Suruga"
    Bay,
    /// Island chain: 小笠原諸島 → "Ogasawara Islands" / "Îles Ogasawara"
    Islands,
    /// Adjacent sea of an island: 沖縄本島近海 → "Near Okinawa Island"
    NearIsland,
    /// No structural pattern; derived languages reuse the curated English
    Custom,
}

/// One curated location: the canonical Japanese name, the romanized proper
/// noun used by the pattern expansion, and hand-curated translations for the
/// languages the upstream vocabulary is maintained in.
struct LocationEntry {
    ja: &'static str,
    romaji: &'static str,
    kind: LocationKind,
    en: &'static str,
    zh: &'static str,
    zh_tw: &'static str,
    ko: &'static str,
    vi: &'static str,
    easy_ja: &'static str,
}

/// Per-language earthquake message skeleton. Placeholders: {location},
/// {magnitude}, {intensity}, {depth}, {tsunami_info}.
#[derive(Debug, Clone)]
pub struct EarthquakeTemplate {
    pub body: &'static str,
    /// Tsunami clause when no tsunami is expected
    pub tsunami_safe: &'static str,
    /// Tsunami clause when a warning is active; placeholder: {warning}
    pub tsunami_warning: &'static str,
}

struct PhraseTable {
    /// (source text, language code) → translation, merged across all
    /// vocabulary classes
    entries: HashMap<(String, &'static str), String>,
    location_count: usize,
    earthquake_templates: HashMap<&'static str, EarthquakeTemplate>,
}

static TABLE: OnceLock<PhraseTable> = OnceLock::new();

fn table() -> &'static PhraseTable {
    TABLE.get_or_init(build_table)
}

/// Exact-match lookup against every static table.
///
/// Returns `None` on a miss, the expected common case for free-form
/// sentences. Japanese targets always miss; the translator short-circuits
/// them before reaching this tier.
pub fn lookup(text: &str, language: Language) -> Option<&'static str> {
    let key = (text.trim().to_owned(), language.code());
    table().entries.get(&key).map(String::as_str)
}

/// Translate a bare intensity scale value ("5弱", "7", ...).
pub fn intensity_label(intensity: &str, language: Language) -> Option<&'static str> {
    lookup(intensity, language)
}

/// Translate a tsunami warning level ("津波警報", "なし", ...).
pub fn tsunami_label(warning: &str, language: Language) -> Option<&'static str> {
    lookup(warning, language)
}

/// Translate a curated epicenter/region name.
pub fn location_name(location: &str, language: Language) -> Option<&'static str> {
    lookup(location, language)
}

/// Number of curated location entries.
pub fn static_location_count() -> usize {
    table().location_count
}

/// The earthquake message skeleton for a language.
pub fn earthquake_template(language: Language) -> &'static EarthquakeTemplate {
    let templates = &table().earthquake_templates;
    templates
        .get(language.code())
        .or_else(|| templates.get("en"))
        .expect("English earthquake template must exist")
}

// ---------------------------------------------------------------------------
// Table construction
// ---------------------------------------------------------------------------

fn build_table() -> PhraseTable {
    let mut entries = HashMap::new();

    let location_count = insert_locations(&mut entries);
    insert_intensities(&mut entries);
    insert_tsunami_levels(&mut entries);
    insert_fixed_sentences(&mut entries);

    PhraseTable {
        entries,
        location_count,
        earthquake_templates: earthquake_templates(),
    }
}

fn insert(
    entries: &mut HashMap<(String, &'static str), String>,
    ja: &str,
    code: &'static str,
    value: String,
) {
    entries.insert((ja.to_owned(), code), value);
}

/// Languages whose location names are derived from per-kind patterns.
const PATTERN_LANGS: [&str; 9] = ["fr", "de", "it", "es", "id", "ms", "tl", "th", "ne"];

fn location_pattern(kind: LocationKind, code: &str) -> Option<&'static str> {
    use LocationKind::*;
    let pattern = match (kind, code) {
        (Region, "fr") => "Région de {}",
        (Region, "de") => "Region {}",
        (Region, "it") => "Regione di {}",
        (Region, "es") => "Región de {}",
        (Region, "id") => "Wilayah {}",
        (Region, "ms") => "Wilayah {}",
        (Region, "tl") => "Rehiyon ng {}",
        (Region, "th") => "ภูมิภาค{}",
        (Region, "ne") => "{} क्षेत्र",

        (OffCoast, "fr") => "Au large de {}",
        (OffCoast, "de") => "Vor der Küste von {}",
        (OffCoast, "it") => "Al largo di {}",
        (OffCoast, "es") => "Frente a la costa de {}",
        (OffCoast, "id") => "Lepas pantai {}",
        (OffCoast, "ms") => "Luar pesisir {}",
        (OffCoast, "tl") => "Sa laot ng {}",
        (OffCoast, "th") => "นอกชายฝั่ง{}",
        (OffCoast, "ne") => "{} को तटभन्दा पर",

        (Bay, "fr") => "Baie de {}",
        (Bay, "de") => "Bucht von {}",
        (Bay, "it") => "Baia di {}",
        (Bay, "es") => "Bahía de {}",
        (Bay, "id") => "Teluk {}",
        (Bay, "ms") => "Teluk {}",
        (Bay, "tl") => "Look ng {}",
        (Bay, "th") => "อ่าว{}",
        (Bay, "ne") => "{} खाडी",

        (Islands, "fr") => "Îles {}",
        (Islands, "de") => "{}-Inseln",
        (Islands, "it") => "Isole {}",
        (Islands, "es") => "Islas {}",
        (Islands, "id") => "Kepulauan {}",
        (Islands, "ms") => "Kepulauan {}",
        (Islands, "tl") => "Mga Isla ng {}",
        (Islands, "th") => "หมู่เกาะ{}",
        (Islands, "ne") => "{} टापुहरू",

        (NearIsland, "fr") => "Près de l'île {}",
        (NearIsland, "de") => "Nahe der Insel {}",
        (NearIsland, "it") => "Vicino all'isola di {}",
        (NearIsland, "es") => "Cerca de la isla {}",
        (NearIsland, "id") => "Dekat Pulau {}",
        (NearIsland, "ms") => "Berhampiran Pulau {}",
        (NearIsland, "tl") => "Malapit sa Isla ng {}",
        (NearIsland, "th") => "ใกล้เกาะ{}",
        (NearIsland, "ne") => "{} टापु नजिक",

        (Custom, _) => return None,
        _ => return None,
    };
    Some(pattern)
}

const fn loc(
    ja: &'static str,
    romaji: &'static str,
    kind: LocationKind,
    en: &'static str,
    zh: &'static str,
    zh_tw: &'static str,
    ko: &'static str,
    vi: &'static str,
    easy_ja: &'static str,
) -> LocationEntry {
    LocationEntry { ja, romaji, kind, en, zh, zh_tw, ko, vi, easy_ja }
}

fn insert_locations(entries: &mut HashMap<(String, &'static str), String>) -> usize {
    use LocationKind::*;

    let locations: &[LocationEntry] = &[
        // Inland regions
        loc("石狩地方", "Ishikari", Region, "Ishikari Region", "石狩地区", "石狩地區", "이시카리 지방", "Khu vực Ishikari", "いしかり ちほう"),
        loc("胆振地方中東部", "Iburi", Custom, "Central-eastern Iburi Region", "胆振地区中东部", "膽振地區中東部", "이부리 지방 중동부", "Miền trung đông khu vực Iburi", "いぶり ちほう ちゅうとうぶ"),
        loc("十勝地方南部", "Tokachi", Custom, "Southern Tokachi Region", "十胜地区南部", "十勝地區南部", "도카치 지방 남부", "Miền nam khu vực Tokachi", "とかち ちほう なんぶ"),
        loc("能登地方", "Noto", Region, "Noto Region", "能登地区", "能登地區", "노토 지방", "Khu vực Noto", "のと ちほう"),
        loc("東京地方", "Tokyo", Region, "Tokyo Area", "东京地区", "東京地區", "도쿄 지역", "Khu vực Tokyo", "とうきょう"),
        loc("大阪府北部", "Osaka", Custom, "Northern Osaka Prefecture", "大阪府北部", "大阪府北部", "오사카부 북부", "Miền bắc phủ Osaka", "おおさかふ ほくぶ"),
        loc("熊本県熊本地方", "Kumamoto", Custom, "Kumamoto Region, Kumamoto Prefecture", "熊本县熊本地区", "熊本縣熊本地區", "구마모토현 구마모토 지방", "Khu vực Kumamoto, tỉnh Kumamoto", "くまもとけん くまもと ちほう"),
        loc("宮城県北部", "Miyagi", Custom, "Northern Miyagi Prefecture", "宫城县北部", "宮城縣北部", "미야기현 북부", "Miền bắc tỉnh Miyagi", "みやぎけん ほくぶ"),
        loc("福島県浜通り", "Fukushima", Custom, "Hamadori, Fukushima Prefecture", "福岛县滨通", "福島縣濱通", "후쿠시마현 하마도리", "Hamadori, tỉnh Fukushima", "ふくしまけん はまどおり"),
        loc("福島県中通り", "Fukushima", Custom, "Nakadori, Fukushima Prefecture", "福岛县中通", "福島縣中通", "후쿠시마현 나카도리", "Nakadori, tỉnh Fukushima", "ふくしまけん なかどおり"),
        loc("長野県北部", "Nagano", Custom, "Northern Nagano Prefecture", "长野县北部", "長野縣北部", "나가노현 북부", "Miền bắc tỉnh Nagano", "ながのけん ほくぶ"),
        loc("岐阜県飛騨地方", "Hida", Custom, "Hida Region, Gifu Prefecture", "岐阜县飞騨地区", "岐阜縣飛驒地區", "기후현 히다 지방", "Khu vực Hida, tỉnh Gifu", "ぎふけん ひだ ちほう"),
        loc("和歌山県北部", "Wakayama", Custom, "Northern Wakayama Prefecture", "和歌山县北部", "和歌山縣北部", "와카야마현 북부", "Miền bắc tỉnh Wakayama", "わかやまけん ほくぶ"),
        loc("鳥取県中部", "Tottori", Custom, "Central Tottori Prefecture", "鸟取县中部", "鳥取縣中部", "돗토리현 중부", "Miền trung tỉnh Tottori", "とっとりけん ちゅうぶ"),
        loc("島根県西部", "Shimane", Custom, "Western Shimane Prefecture", "岛根县西部", "島根縣西部", "시마네현 서부", "Miền tây tỉnh Shimane", "しまねけん せいぶ"),
        loc("愛媛県南予", "Ehime", Custom, "Nanyo, Ehime Prefecture", "爱媛县南予", "愛媛縣南予", "에히메현 난요", "Nanyo, tỉnh Ehime", "えひめけん なんよ"),
        loc("大分県中部", "Oita", Custom, "Central Oita Prefecture", "大分县中部", "大分縣中部", "오이타현 중부", "Miền trung tỉnh Oita", "おおいたけん ちゅうぶ"),
        loc("鹿児島県薩摩地方", "Satsuma", Custom, "Satsuma Region, Kagoshima Prefecture", "鹿儿岛县萨摩地区", "鹿兒島縣薩摩地區", "가고시마현 사쓰마 지방", "Khu vực Satsuma, tỉnh Kagoshima", "かごしまけん さつま ちほう"),
        // Island groups
        loc("伊豆諸島北部", "Izu", Custom, "Northern Izu Islands", "伊豆诸岛北部", "伊豆諸島北部", "이즈 제도 북부", "Bắc quần đảo Izu", "いずしょとう きたぶ"),
        loc("伊豆諸島南部", "Izu", Custom, "Southern Izu Islands", "伊豆诸岛南部", "伊豆諸島南部", "이즈 제도 남부", "Nam quần đảo Izu", "いずしょとう みなみぶ"),
        loc("小笠原諸島", "Ogasawara", Islands, "Ogasawara Islands", "小笠原群岛", "小笠原群島", "오가사와라 제도", "Quần đảo Ogasawara", "おがさわらしょとう"),
        loc("千島列島", "Kuril", Islands, "Kuril Islands", "千岛群岛", "千島群島", "지시마 열도", "Quần đảo Kuril", "ちしま れっとう"),
        loc("トカラ列島近海", "Tokara", Custom, "Near the Tokara Islands", "吐噶喇列岛近海", "吐噶喇列島近海", "도카라 열도 인근 해역", "Gần quần đảo Tokara", "とから れっとう きんかい"),
        // Offshore of prefectures
        loc("岩手県沖", "Iwate", OffCoast, "Off the coast of Iwate Prefecture", "岩手县近海", "岩手縣近海", "이와테현 앞바다", "Ngoài khơi tỉnh Iwate", "いわてけん おき"),
        loc("宮城県沖", "Miyagi", OffCoast, "Off the coast of Miyagi Prefecture", "宫城县近海", "宮城縣近海", "미야기현 앞바다", "Ngoài khơi tỉnh Miyagi", "みやぎけん おき"),
        loc("福島県沖", "Fukushima", OffCoast, "Off the coast of Fukushima Prefecture", "福岛县近海", "福島縣近海", "후쿠시마현 앞바다", "Ngoài khơi tỉnh Fukushima", "ふくしまけん おき"),
        loc("茨城県沖", "Ibaraki", OffCoast, "Off the coast of Ibaraki Prefecture", "茨城县近海", "茨城縣近海", "이바라키현 앞바다", "Ngoài khơi tỉnh Ibaraki", "いばらきけん おき"),
        loc("秋田県沖", "Akita", OffCoast, "Off the coast of Akita Prefecture", "秋田县近海", "秋田縣近海", "아키타현 앞바다", "Ngoài khơi tỉnh Akita", "あきたけん おき"),
        loc("山形県沖", "Yamagata", OffCoast, "Off the coast of Yamagata Prefecture", "山形县近海", "山形縣近海", "야마가타현 앞바다", "Ngoài khơi tỉnh Yamagata", "やまがたけん おき"),
        loc("福井県沖", "Fukui", OffCoast, "Off the coast of Fukui Prefecture", "福井县近海", "福井縣近海", "후쿠이현 앞바다", "Ngoài khơi tỉnh Fukui", "ふくいけん おき"),
        loc("島根県沖", "Shimane", OffCoast, "Off the coast of Shimane Prefecture", "岛根县近海", "島根縣近海", "시마네현 앞바다", "Ngoài khơi tỉnh Shimane", "しまねけん おき"),
        loc("釧路沖", "Kushiro", OffCoast, "Off the coast of Kushiro", "钏路近海", "釧路近海", "구시로 앞바다", "Ngoài khơi Kushiro", "くしろ おき"),
        // Directional offshore (no structural pattern; English reused)
        loc("青森県東方沖", "Aomori", Custom, "Off the east coast of Aomori Prefecture", "青森县东方近海", "青森縣東方近海", "아오모리현 동쪽 앞바다", "Ngoài khơi phía đông tỉnh Aomori", "あおもりけん とうほう おき"),
        loc("千葉県東方沖", "Chiba", Custom, "Off the east coast of Chiba Prefecture", "千叶县东方近海", "千葉縣東方近海", "지바현 동쪽 앞바다", "Ngoài khơi phía đông tỉnh Chiba", "ちばけん とうほう おき"),
        loc("房総半島南方沖", "Boso", Custom, "Off the south coast of the Boso Peninsula", "房总半岛南方近海", "房總半島南方近海", "보소 반도 남쪽 앞바다", "Ngoài khơi phía nam bán đảo Boso", "ぼうそうはんとう なんぽう おき"),
        loc("北海道南西沖", "Hokkaido", Custom, "Off the southwest coast of Hokkaido", "北海道西南近海", "北海道西南近海", "홋카이도 남서쪽 앞바다", "Ngoài khơi phía tây nam Hokkaido", "ほっかいどう なんせい おき"),
        loc("北海道北西沖", "Hokkaido", Custom, "Off the northwest coast of Hokkaido", "北海道西北近海", "北海道西北近海", "홋카이도 북서쪽 앞바다", "Ngoài khơi phía tây bắc Hokkaido", "ほっかいどう ほくせい おき"),
        loc("北海道東方沖", "Hokkaido", Custom, "Off the east coast of Hokkaido", "北海道东方近海", "北海道東方近海", "홋카이도 동쪽 앞바다", "Ngoài khơi phía đông Hokkaido", "ほっかいどう とうほう おき"),
        loc("根室半島南東沖", "Nemuro", Custom, "Off the southeast coast of the Nemuro Peninsula", "根室半岛东南近海", "根室半島東南近海", "네무로 반도 남동쪽 앞바다", "Ngoài khơi phía đông nam bán đảo Nemuro", "ねむろはんとう なんとう おき"),
        loc("三陸沖", "Sanriku", Custom, "Off the Sanriku coast", "三陆近海", "三陸近海", "산리쿠 앞바다", "Ngoài khơi Sanriku", "さんりく おき"),
        loc("石川県西方沖", "Ishikawa", Custom, "Off the west coast of Ishikawa Prefecture", "石川县西方近海", "石川縣西方近海", "이시카와현 서쪽 앞바다", "Ngoài khơi phía tây tỉnh Ishikawa", "いしかわけん せいほう おき"),
        loc("能登半島沖", "Noto", Custom, "Off the Noto Peninsula", "能登半岛近海", "能登半島近海", "노토 반도 앞바다", "Ngoài khơi bán đảo Noto", "のとはんとう おき"),
        loc("東海道南方沖", "Tokaido", Custom, "Off the south coast of the Tokaido", "东海道南方近海", "東海道南方近海", "도카이도 남쪽 앞바다", "Ngoài khơi phía nam Tokaido", "とうかいどう なんぽう おき"),
        loc("紀伊半島南東沖", "Kii", Custom, "Off the southeast coast of the Kii Peninsula", "纪伊半岛东南近海", "紀伊半島東南近海", "기이 반도 남동쪽 앞바다", "Ngoài khơi phía đông nam bán đảo Kii", "きいはんとう なんとう おき"),
        loc("和歌山県南方沖", "Wakayama", Custom, "Off the south coast of Wakayama Prefecture", "和歌山县南方近海", "和歌山縣南方近海", "와카야마현 남쪽 앞바다", "Ngoài khơi phía nam tỉnh Wakayama", "わかやまけん なんぽう おき"),
        loc("山口県北西沖", "Yamaguchi", Custom, "Off the northwest coast of Yamaguchi Prefecture", "山口县西北近海", "山口縣西北近海", "야마구치현 북서쪽 앞바다", "Ngoài khơi phía tây bắc tỉnh Yamaguchi", "やまぐちけん ほくせい おき"),
        loc("種子島南東沖", "Tanegashima", Custom, "Off the southeast coast of Tanegashima", "种子岛东南近海", "種子島東南近海", "다네가시마 남동쪽 앞바다", "Ngoài khơi phía đông nam Tanegashima", "たねがしま なんとう おき"),
        loc("薩摩半島西方沖", "Satsuma", Custom, "Off the west coast of the Satsuma Peninsula", "萨摩半岛西方近海", "薩摩半島西方近海", "사쓰마 반도 서쪽 앞바다", "Ngoài khơi phía tây bán đảo Satsuma", "さつまはんとう せいほう おき"),
        loc("宮古島北西沖", "Miyakojima", Custom, "Off the northwest coast of Miyakojima", "宫古岛西北近海", "宮古島西北近海", "미야코지마 북서쪽 앞바다", "Ngoài khơi phía tây bắc Miyakojima", "みやこじま ほくせい おき"),
        loc("石垣島北西沖", "Ishigakijima", Custom, "Off the northwest coast of Ishigakijima", "石垣岛西北近海", "石垣島西北近海", "이시가키지마 북서쪽 앞바다", "Ngoài khơi phía tây bắc Ishigakijima", "いしがきじま ほくせい おき"),
        // Bays
        loc("東京湾", "Tokyo", Bay, "Tokyo Bay", "东京湾", "東京灣", "도쿄만", "Vịnh Tokyo", "とうきょうわん"),
        loc("大阪湾", "Osaka", Bay, "Osaka Bay", "大阪湾", "大阪灣", "오사카만", "Vịnh Osaka", "おおさかわん"),
        loc("伊勢湾", "Ise", Bay, "Ise Bay", "伊势湾", "伊勢灣", "이세만", "Vịnh Ise", "いせわん"),
        loc("駿河湾", "Suruga", Bay, "Suruga Bay", "骏河湾", "駿河灣", "스루가만", "Vịnh Suruga", "するがわん"),
        loc("相模湾", "Sagami", Bay, "Sagami Bay", "相模湾", "相模灣", "사가미만", "Vịnh Sagami", "さがみわん"),
        loc("陸奥湾", "Mutsu", Bay, "Mutsu Bay", "陆奥湾", "陸奧灣", "무쓰만", "Vịnh Mutsu", "むつわん"),
        // Seas, channels, straits
        loc("日本海中部", "Japan", Custom, "Central Sea of Japan", "日本海中部", "日本海中部", "동해 중부", "Miền trung biển Nhật Bản", "にほんかい ちゅうぶ"),
        loc("日本海西部", "Japan", Custom, "Western Sea of Japan", "日本海西部", "日本海西部", "동해 서부", "Miền tây biển Nhật Bản", "にほんかい せいぶ"),
        loc("オホーツク海南部", "Okhotsk", Custom, "Southern Sea of Okhotsk", "鄂霍次克海南部", "鄂霍次克海南部", "오호츠크해 남부", "Miền nam biển Okhotsk", "おほーつくかい なんぶ"),
        loc("遠州灘", "Enshunada", Custom, "Enshunada Sea", "远州滩", "遠州灘", "엔슈나다", "Biển Enshunada", "えんしゅうなだ"),
        loc("熊野灘", "Kumanonada", Custom, "Kumanonada Sea", "熊野滩", "熊野灘", "구마노나다", "Biển Kumanonada", "くまのなだ"),
        loc("豊後水道", "Bungo", Custom, "Bungo Channel", "丰后水道", "豐後水道", "분고 수도", "Eo biển Bungo", "ぶんご すいどう"),
        loc("紀伊水道", "Kii", Custom, "Kii Channel", "纪伊水道", "紀伊水道", "기이 수도", "Eo biển Kii", "きい すいどう"),
        loc("瀬戸内海中部", "Seto", Custom, "Central Seto Inland Sea", "濑户内海中部", "瀨戶內海中部", "세토 내해 중부", "Miền trung biển nội địa Seto", "せとないかい ちゅうぶ"),
        loc("安芸灘", "Akinada", Custom, "Akinada Sea", "安艺滩", "安藝灘", "아키나다", "Biển Akinada", "あきなだ"),
        loc("周防灘", "Suonada", Custom, "Suonada Sea", "周防滩", "周防灘", "스오나다", "Biển Suonada", "すおうなだ"),
        loc("伊予灘", "Iyonada", Custom, "Iyonada Sea", "伊予滩", "伊予灘", "이요나다", "Biển Iyonada", "いよなだ"),
        loc("日向灘", "Hyuganada", Custom, "Hyuganada Sea", "日向滩", "日向灘", "휴가나다", "Biển Hyuganada", "ひゅうがなだ"),
        // Near-island seas
        loc("択捉島付近", "Etorofu", NearIsland, "Near Etorofu Island", "择捉岛附近", "擇捉島附近", "에토로후섬 부근", "Gần đảo Etorofu", "えとろふとう ふきん"),
        loc("国後島付近", "Kunashiri", NearIsland, "Near Kunashiri Island", "国后岛附近", "國後島附近", "구나시리섬 부근", "Gần đảo Kunashiri", "くなしりとう ふきん"),
        loc("佐渡付近", "Sado", NearIsland, "Near Sado Island", "佐渡附近", "佐渡附近", "사도섬 부근", "Gần đảo Sado", "さど ふきん"),
        loc("奄美大島近海", "Amami-Oshima", NearIsland, "Near Amami-Oshima Island", "奄美大岛近海", "奄美大島近海", "아마미오시마 인근 해역", "Gần đảo Amami-Oshima", "あまみおおしま きんかい"),
        loc("沖縄本島近海", "Okinawa", NearIsland, "Near Okinawa Island", "冲绳本岛近海", "沖繩本島近海", "오키나와 본섬 인근 해역", "Gần đảo chính Okinawa", "おきなわほんとう きんかい"),
        loc("宮古島近海", "Miyakojima", NearIsland, "Near Miyakojima Island", "宫古岛近海", "宮古島近海", "미야코지마 인근 해역", "Gần đảo Miyakojima", "みやこじま きんかい"),
        loc("石垣島近海", "Ishigakijima", NearIsland, "Near Ishigakijima Island", "石垣岛近海", "石垣島近海", "이시가키지마 인근 해역", "Gần đảo Ishigakijima", "いしがきじま きんかい"),
        loc("与那国島近海", "Yonaguni", NearIsland, "Near Yonaguni Island", "与那国岛近海", "與那國島近海", "요나구니지마 인근 해역", "Gần đảo Yonaguni", "よなぐにじま きんかい"),
        loc("台湾付近", "Taiwan", Custom, "Near Taiwan", "台湾附近", "台灣附近", "대만 부근", "Gần Đài Loan", "たいわん ふきん"),
    ];

    for entry in locations {
        insert(entries, entry.ja, "en", entry.en.to_owned());
        insert(entries, entry.ja, "zh", entry.zh.to_owned());
        insert(entries, entry.ja, "zh-TW", entry.zh_tw.to_owned());
        insert(entries, entry.ja, "ko", entry.ko.to_owned());
        insert(entries, entry.ja, "vi", entry.vi.to_owned());
        insert(entries, entry.ja, "easy_ja", entry.easy_ja.to_owned());

        for code in PATTERN_LANGS {
            let value = match location_pattern(entry.kind, code) {
                Some(pattern) => pattern.replace("{}", entry.romaji),
                None => entry.en.to_owned(),
            };
            entries.insert((entry.ja.to_owned(), code), value);
        }
    }

    locations.len()
}

/// JMA seismic intensity scale values.
const INTENSITY_SCALES: [&str; 9] = ["1", "2", "3", "4", "5弱", "5強", "6弱", "6強", "7"];

/// Per-language rendering of intensity labels: (prefix, lower, upper,
/// spaced). "5弱" renders as "{prefix} 5 {lower}" when spaced, or
/// "{prefix}5{lower}" otherwise.
const INTENSITY_STYLES: [(&str, &str, &str, &str, bool); 15] = [
    ("easy_ja", "しんど", "じゃく", "きょう", false),
    ("en", "Intensity", "Lower", "Upper", true),
    ("zh", "震度", "弱", "强", false),
    ("zh-TW", "震度", "弱", "強", false),
    ("ko", "진도", "약", "강", true),
    ("vi", "Cường độ", "yếu", "mạnh", true),
    ("th", "ระดับความสั่นสะเทือน", "อ่อน", "แรง", true),
    ("id", "Intensitas", "Lemah", "Kuat", true),
    ("ms", "Intensiti", "Lemah", "Kuat", true),
    ("tl", "Intensity", "Mahina", "Malakas", true),
    ("fr", "Intensité", "faible", "forte", true),
    ("de", "Intensität", "schwach", "stark", true),
    ("it", "Intensità", "debole", "forte", true),
    ("es", "Intensidad", "baja", "alta", true),
    ("ne", "तीव्रता", "कम", "बढी", true),
];

fn insert_intensities(entries: &mut HashMap<(String, &'static str), String>) {
    for (code, prefix, lower, upper, spaced) in INTENSITY_STYLES {
        for scale in INTENSITY_SCALES {
            let (digit, suffix) = match scale.strip_suffix('弱') {
                Some(d) => (d, Some(lower)),
                None => match scale.strip_suffix('強') {
                    Some(d) => (d, Some(upper)),
                    None => (scale, None),
                },
            };

            let label = match (suffix, spaced) {
                (Some(s), true) => format!("{} {} {}", prefix, digit, s),
                (Some(s), false) => format!("{}{}{}", prefix, digit, s),
                (None, true) => format!("{} {}", prefix, digit),
                (None, false) => format!("{}{}", prefix, digit),
            };

            // Both the bare scale ("5弱") and the full report form ("震度5弱")
            // resolve to the same label.
            insert(entries, scale, code, label.clone());
            insert(entries, &format!("震度{}", scale), code, label);
        }
    }
}

fn insert_tsunami_levels(entries: &mut HashMap<(String, &'static str), String>) {
    let levels: [(&str, [(&str, &str); 15]); 4] = [
        ("大津波警報", [
            ("easy_ja", "おおつなみ けいほう"),
            ("en", "Major Tsunami Warning"),
            ("zh", "大海啸警报"),
            ("zh-TW", "大海嘯警報"),
            ("ko", "대형 쓰나미 경보"),
            ("vi", "Cảnh báo sóng thần lớn"),
            ("th", "ประกาศเตือนภัยสึนามิขนาดใหญ่"),
            ("id", "Peringatan Tsunami Besar"),
            ("ms", "Amaran Tsunami Besar"),
            ("tl", "Babala ng Malaking Tsunami"),
            ("fr", "Alerte majeure au tsunami"),
            ("de", "Große Tsunami-Warnung"),
            ("it", "Allerta tsunami maggiore"),
            ("es", "Alerta de tsunami mayor"),
            ("ne", "ठूलो सुनामी चेतावनी"),
        ]),
        ("津波警報", [
            ("easy_ja", "つなみ けいほう"),
            ("en", "Tsunami Warning"),
            ("zh", "海啸警报"),
            ("zh-TW", "海嘯警報"),
            ("ko", "쓰나미 경보"),
            ("vi", "Cảnh báo sóng thần"),
            ("th", "ประกาศเตือนภัยสึนามิ"),
            ("id", "Peringatan Tsunami"),
            ("ms", "Amaran Tsunami"),
            ("tl", "Babala ng Tsunami"),
            ("fr", "Alerte au tsunami"),
            ("de", "Tsunami-Warnung"),
            ("it", "Allerta tsunami"),
            ("es", "Alerta de tsunami"),
            ("ne", "सुनामी चेतावनी"),
        ]),
        ("津波注意報", [
            ("easy_ja", "つなみ ちゅういほう"),
            ("en", "Tsunami Advisory"),
            ("zh", "海啸注意报"),
            ("zh-TW", "海嘯注意報"),
            ("ko", "쓰나미 주의보"),
            ("vi", "Chú ý sóng thần"),
            ("th", "ประกาศเฝ้าระวังสึนามิ"),
            ("id", "Imbauan Waspada Tsunami"),
            ("ms", "Nasihat Tsunami"),
            ("tl", "Paalala ng Tsunami"),
            ("fr", "Avis de tsunami"),
            ("de", "Tsunami-Hinweis"),
            ("it", "Avviso tsunami"),
            ("es", "Aviso de tsunami"),
            ("ne", "सुनामी सावधानी"),
        ]),
        ("なし", [
            ("easy_ja", "なし"),
            ("en", "None"),
            ("zh", "无"),
            ("zh-TW", "無"),
            ("ko", "없음"),
            ("vi", "Không có"),
            ("th", "ไม่มี"),
            ("id", "Tidak ada"),
            ("ms", "Tiada"),
            ("tl", "Wala"),
            ("fr", "Aucune"),
            ("de", "Keine"),
            ("it", "Nessuna"),
            ("es", "Ninguna"),
            ("ne", "छैन"),
        ]),
    ];

    for (ja, translations) in levels {
        for (code, value) in translations {
            insert(entries, ja, code, value.to_owned());
        }
    }
}

/// Fixed alert sentences that appear verbatim in upstream bulletins.
/// Exact-match only; there is no keyword or fuzzy matching.
fn insert_fixed_sentences(entries: &mut HashMap<(String, &'static str), String>) {
    let sentences: [(&str, [(&str, &str); 15]); 2] = [
        ("【津波警報】沿岸部の方は直ちに高台に避難してください。", [
            ("easy_ja", "【つなみ けいほう】うみの ちかくに いる ひとは すぐに たかい ところへ にげて ください。"),
            ("en", "[Tsunami Warning] If you are near the coast, evacuate to higher ground immediately."),
            ("zh", "【海啸警报】沿海地区人员请立即撤离到高处。"),
            ("zh-TW", "【海嘯警報】沿海地區人員請立即撤離到高處。"),
            ("ko", "【쓰나미 경보】해안 근처에 계신 분은 즉시 높은 곳으로 대피하십시오."),
            ("vi", "[Cảnh báo sóng thần] Người ở vùng ven biển hãy sơ tán ngay lên vùng đất cao."),
            ("th", "[ประกาศเตือนภัยสึนามิ] ผู้ที่อยู่ใกล้ชายฝั่งโปรดอพยพไปยังที่สูงทันที"),
            ("id", "[Peringatan Tsunami] Jika Anda berada di dekat pantai, segera mengungsi ke tempat yang lebih tinggi."),
            ("ms", "[Amaran Tsunami] Jika anda berada berhampiran pantai, segera berpindah ke kawasan tinggi."),
            ("tl", "[Babala ng Tsunami] Kung nasa malapit kayo sa baybayin, lumikas agad sa mataas na lugar."),
            ("fr", "[Alerte au tsunami] Si vous êtes près de la côte, évacuez immédiatement vers les hauteurs."),
            ("de", "[Tsunami-Warnung] Wenn Sie sich in Küstennähe befinden, begeben Sie sich sofort auf höher gelegenes Gelände."),
            ("it", "[Allerta tsunami] Se vi trovate vicino alla costa, evacuate immediatamente verso un luogo elevato."),
            ("es", "[Alerta de tsunami] Si está cerca de la costa, evacúe inmediatamente hacia terrenos elevados."),
            ("ne", "[सुनामी चेतावनी] तटीय क्षेत्रमा हुनुहुन्छ भने तुरुन्तै अग्लो स्थानमा जानुहोस्।"),
        ]),
        ("強い揺れに警戒してください。", [
            ("easy_ja", "つよい ゆれに きを つけて ください。"),
            ("en", "Be on alert for strong tremors."),
            ("zh", "请警惕强烈摇晃。"),
            ("zh-TW", "請警惕強烈搖晃。"),
            ("ko", "강한 흔들림에 주의하십시오."),
            ("vi", "Hãy cảnh giác với rung lắc mạnh."),
            ("th", "โปรดระวังการสั่นสะเทือนรุนแรง"),
            ("id", "Waspadai guncangan kuat."),
            ("ms", "Berwaspada terhadap gegaran kuat."),
            ("tl", "Mag-ingat sa malalakas na pagyanig."),
            ("fr", "Restez vigilant face aux fortes secousses."),
            ("de", "Achten Sie auf starke Erschütterungen."),
            ("it", "Prestate attenzione a forti scosse."),
            ("es", "Manténgase alerta ante sacudidas fuertes."),
            ("ne", "बलियो कम्पनप्रति सतर्क रहनुहोस्।"),
        ]),
    ];

    for (ja, translations) in sentences {
        for (code, value) in translations {
            insert(entries, ja, code, value.to_owned());
        }
    }
}

fn earthquake_templates() -> HashMap<&'static str, EarthquakeTemplate> {
    let mut templates = HashMap::new();

    templates.insert("ja", EarthquakeTemplate {
        body: "【地震情報】{location}で地震が発生しました。マグニチュード{magnitude}、最大震度{intensity}。震源の深さ約{depth}km。{tsunami_info}",
        tsunami_safe: "この地震による津波の心配はありません。",
        tsunami_warning: "津波情報: {warning}。",
    });
    templates.insert("easy_ja", EarthquakeTemplate {
        body: "【じしん】{location}で じしんが ありました。つよさは {intensity} です。ふかさは {depth}キロメートル。{tsunami_info}",
        tsunami_safe: "この じしんで つなみの しんぱいは ありません。",
        tsunami_warning: "つなみ じょうほう: {warning}。",
    });
    templates.insert("en", EarthquakeTemplate {
        body: "[Earthquake] An earthquake occurred in {location}. Magnitude {magnitude}, Maximum intensity {intensity}. Depth: {depth}km. {tsunami_info}",
        tsunami_safe: "There is no tsunami risk from this earthquake.",
        tsunami_warning: "Tsunami information: {warning}.",
    });
    templates.insert("zh", EarthquakeTemplate {
        body: "【地震信息】{location}发生地震。震级{magnitude}，最大震度{intensity}。震源深度约{depth}公里。{tsunami_info}",
        tsunami_safe: "此次地震没有海啸风险。",
        tsunami_warning: "海啸信息：{warning}。",
    });
    templates.insert("zh-TW", EarthquakeTemplate {
        body: "【地震資訊】{location}發生地震。規模{magnitude}，最大震度{intensity}。震源深度約{depth}公里。{tsunami_info}",
        tsunami_safe: "此次地震沒有海嘯風險。",
        tsunami_warning: "海嘯資訊：{warning}。",
    });
    templates.insert("ko", EarthquakeTemplate {
        body: "【지진정보】{location}에서 지진이 발생했습니다. 규모 {magnitude}, 최대진도 {intensity}. 진원 깊이 약 {depth}km. {tsunami_info}",
        tsunami_safe: "이 지진으로 인한 쓰나미 위험은 없습니다.",
        tsunami_warning: "쓰나미 정보: {warning}.",
    });
    templates.insert("vi", EarthquakeTemplate {
        body: "[Động đất] Động đất xảy ra tại {location}. Cường độ {magnitude}, Cường độ tối đa {intensity}. Độ sâu: {depth}km. {tsunami_info}",
        tsunami_safe: "Không có nguy cơ sóng thần từ trận động đất này.",
        tsunami_warning: "Thông tin sóng thần: {warning}.",
    });
    templates.insert("th", EarthquakeTemplate {
        body: "[แผ่นดินไหว] เกิดแผ่นดินไหวที่ {location} ขนาด {magnitude} ความรุนแรงสูงสุด {intensity} ความลึก: {depth} กม. {tsunami_info}",
        tsunami_safe: "ไม่มีความเสี่ยงจากสึนามิจากแผ่นดินไหวครั้งนี้",
        tsunami_warning: "ข้อมูลสึนามิ: {warning}",
    });
    templates.insert("id", EarthquakeTemplate {
        body: "[Gempa] Gempa bumi terjadi di {location}. Magnitudo {magnitude}, Intensitas maksimum {intensity}. Kedalaman: {depth}km. {tsunami_info}",
        tsunami_safe: "Tidak ada risiko tsunami dari gempa ini.",
        tsunami_warning: "Informasi tsunami: {warning}.",
    });
    templates.insert("ms", EarthquakeTemplate {
        body: "[Gempa Bumi] Gempa bumi berlaku di {location}. Magnitud {magnitude}, Keamatan maksimum {intensity}. Kedalaman: {depth}km. {tsunami_info}",
        tsunami_safe: "Tiada risiko tsunami daripada gempa bumi ini.",
        tsunami_warning: "Maklumat tsunami: {warning}.",
    });
    templates.insert("tl", EarthquakeTemplate {
        body: "[Lindol] Nagkaroon ng lindol sa {location}. Magnitude {magnitude}, Pinakamataas na intensity {intensity}. Lalim: {depth}km. {tsunami_info}",
        tsunami_safe: "Walang panganib ng tsunami mula sa lindol na ito.",
        tsunami_warning: "Impormasyon tungkol sa tsunami: {warning}.",
    });
    templates.insert("fr", EarthquakeTemplate {
        body: "[Séisme] Un séisme s'est produit à {location}. Magnitude {magnitude}, Intensité maximale {intensity}. Profondeur: {depth}km. {tsunami_info}",
        tsunami_safe: "Il n'y a pas de risque de tsunami suite à ce séisme.",
        tsunami_warning: "Information tsunami: {warning}.",
    });
    templates.insert("de", EarthquakeTemplate {
        body: "[Erdbeben] Ein Erdbeben ereignete sich in {location}. Magnitude {magnitude}, Maximale Intensität {intensity}. Tiefe: {depth}km. {tsunami_info}",
        tsunami_safe: "Es besteht keine Tsunami-Gefahr durch dieses Erdbeben.",
        tsunami_warning: "Tsunami-Information: {warning}.",
    });
    templates.insert("it", EarthquakeTemplate {
        body: "[Terremoto] Si è verificato un terremoto a {location}. Magnitudo {magnitude}, Intensità massima {intensity}. Profondità: {depth}km. {tsunami_info}",
        tsunami_safe: "Non c'è rischio di tsunami da questo terremoto.",
        tsunami_warning: "Informazioni tsunami: {warning}.",
    });
    templates.insert("es", EarthquakeTemplate {
        body: "[Terremoto] Ocurrió un terremoto en {location}. Magnitud {magnitude}, Intensidad máxima {intensity}. Profundidad: {depth}km. {tsunami_info}",
        tsunami_safe: "No hay riesgo de tsunami por este terremoto.",
        tsunami_warning: "Información de tsunami: {warning}.",
    });
    templates.insert("ne", EarthquakeTemplate {
        body: "[भूकम्प] {location} मा भूकम्प आयो। म्याग्निच्युड {magnitude}, अधिकतम तीव्रता {intensity}। गहिराई: {depth} किमी। {tsunami_info}",
        tsunami_safe: "यस भूकम्पबाट सुनामीको जोखिम छैन।",
        tsunami_warning: "सुनामी जानकारी: {warning}।",
    });

    templates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_lookup_curated_english() {
        assert_eq!(
            location_name("北海道北西沖", Language::ENGLISH),
            Some("Off the northwest coast of Hokkaido")
        );
        assert_eq!(
            location_name("福島県沖", Language::ENGLISH),
            Some("Off the coast of Fukushima Prefecture")
        );
    }

    #[test]
    fn test_location_lookup_curated_asian_languages() {
        assert_eq!(location_name("東京湾", Language::KOREAN), Some("도쿄만"));
        assert_eq!(location_name("小笠原諸島", Language::CHINESE), Some("小笠原群岛"));
        assert_eq!(
            location_name("伊豆諸島北部", Language::EASY_JAPANESE),
            Some("いずしょとう きたぶ")
        );
    }

    #[test]
    fn test_location_lookup_pattern_derived() {
        let fr = Language::from_code("fr").unwrap();
        assert_eq!(location_name("石狩地方", fr), Some("Région de Ishikari"));
        assert_eq!(location_name("駿河湾", fr), Some("Baie de Suruga"));

        let de = Language::from_code("de").unwrap();
        assert_eq!(location_name("小笠原諸島", de), Some("Ogasawara-Inseln"));
    }

    #[test]
    fn test_location_custom_falls_back_to_english_for_pattern_langs() {
        let es = Language::from_code("es").unwrap();
        assert_eq!(
            location_name("三陸沖", es),
            Some("Off the Sanriku coast")
        );
    }

    #[test]
    fn test_location_miss_returns_none() {
        assert_eq!(location_name("知らない場所", Language::ENGLISH), None);
    }

    #[test]
    fn test_location_lookup_is_exact_match_only() {
        // Substrings and supersets must not match
        assert_eq!(location_name("福島県", Language::ENGLISH), None);
        assert_eq!(location_name("福島県沖で地震", Language::ENGLISH), None);
    }

    #[test]
    fn test_lookup_trims_whitespace() {
        assert_eq!(
            lookup("  福島県沖  ", Language::ENGLISH),
            Some("Off the coast of Fukushima Prefecture")
        );
    }

    #[test]
    fn test_location_count_in_spec_range() {
        let count = static_location_count();
        assert!((60..=90).contains(&count), "curated list has {} entries", count);
    }

    #[test]
    fn test_all_locations_resolve_in_every_target_language() {
        for lang in Language::all() {
            if lang.is_source() {
                continue;
            }
            assert_eq!(
                location_name("福島県沖", lang).is_some(),
                true,
                "missing {} translation",
                lang.code()
            );
        }
    }

    #[test]
    fn test_intensity_five_lower_english() {
        assert_eq!(intensity_label("5弱", Language::ENGLISH), Some("Intensity 5 Lower"));
        assert_eq!(lookup("震度5弱", Language::ENGLISH), Some("Intensity 5 Lower"));
    }

    #[test]
    fn test_intensity_plain_scale() {
        assert_eq!(intensity_label("3", Language::ENGLISH), Some("Intensity 3"));
        assert_eq!(intensity_label("7", Language::KOREAN), Some("진도 7"));
    }

    #[test]
    fn test_intensity_unspaced_languages() {
        assert_eq!(intensity_label("6強", Language::CHINESE), Some("震度6强"));
        let zh_tw = Language::from_code("zh-TW").unwrap();
        assert_eq!(intensity_label("6強", zh_tw), Some("震度6強"));
        assert_eq!(intensity_label("5弱", Language::EASY_JAPANESE), Some("しんど5じゃく"));
    }

    #[test]
    fn test_intensity_unknown_scale_misses() {
        assert_eq!(intensity_label("8", Language::ENGLISH), None);
        assert_eq!(intensity_label("5", Language::ENGLISH), None);
    }

    #[test]
    fn test_tsunami_levels() {
        assert_eq!(tsunami_label("津波警報", Language::ENGLISH), Some("Tsunami Warning"));
        assert_eq!(tsunami_label("大津波警報", Language::VIETNAMESE), Some("Cảnh báo sóng thần lớn"));
        assert_eq!(tsunami_label("なし", Language::ENGLISH), Some("None"));
    }

    #[test]
    fn test_fixed_sentence_exact_match() {
        let translated = lookup(
            "【津波警報】沿岸部の方は直ちに高台に避難してください。",
            Language::ENGLISH,
        )
        .expect("sentence should be in the table");
        assert!(translated.contains("Tsunami Warning"));
        assert!(translated.to_lowercase().contains("evacuate"));
    }

    #[test]
    fn test_earthquake_template_english() {
        let template = earthquake_template(Language::ENGLISH);
        assert!(template.body.contains("{location}"));
        assert!(template.body.contains("{magnitude}"));
        assert!(template.tsunami_warning.contains("{warning}"));
    }

    #[test]
    fn test_earthquake_template_exists_for_all_languages() {
        for lang in Language::all() {
            let template = earthquake_template(lang);
            assert!(template.body.contains("{intensity}"), "{}", lang.code());
        }
    }

    #[test]
    fn test_japanese_target_always_misses() {
        assert_eq!(lookup("福島県沖", Language::JAPANESE), None);
        assert_eq!(lookup("5弱", Language::JAPANESE), None);
    }
}

// src/location/codes.rs
//
// Static administrative code tables. Built once, read-only. A lookup miss
// resolves to the その他 sentinel at the call site, never to a panic.

/// Placeholder name for anything the code tables cannot map.
pub const SENTINEL: &str = "その他";

/// JIS prefecture codes 1..=47.
const PREFECTURES: &[(u32, &str)] = &[
    (1, "北海道"),
    (2, "青森県"),
    (3, "岩手県"),
    (4, "宮城県"),
    (5, "秋田県"),
    (6, "山形県"),
    (7, "福島県"),
    (8, "茨城県"),
    (9, "栃木県"),
    (10, "群馬県"),
    (11, "埼玉県"),
    (12, "千葉県"),
    (13, "東京都"),
    (14, "神奈川県"),
    (15, "新潟県"),
    (16, "富山県"),
    (17, "石川県"),
    (18, "福井県"),
    (19, "山梨県"),
    (20, "長野県"),
    (21, "岐阜県"),
    (22, "静岡県"),
    (23, "愛知県"),
    (24, "三重県"),
    (25, "滋賀県"),
    (26, "京都府"),
    (27, "大阪府"),
    (28, "兵庫県"),
    (29, "奈良県"),
    (30, "和歌山県"),
    (31, "鳥取県"),
    (32, "島根県"),
    (33, "岡山県"),
    (34, "広島県"),
    (35, "山口県"),
    (36, "徳島県"),
    (37, "香川県"),
    (38, "愛媛県"),
    (39, "高知県"),
    (40, "福岡県"),
    (41, "佐賀県"),
    (42, "長崎県"),
    (43, "熊本県"),
    (44, "大分県"),
    (45, "宮崎県"),
    (46, "鹿児島県"),
    (47, "沖縄県"),
];

/// (prefecture code, municipality code) -> municipality name, for the
/// prefectures the site currently lists.
const CITIES: &[(u32, u32, &str)] = &[
    // 千葉県 (12)
    (12, 100, "千葉市"),
    (12, 101, "千葉市中央区"),
    (12, 102, "千葉市花見川区"),
    (12, 103, "千葉市稲毛区"),
    (12, 104, "千葉市若葉区"),
    (12, 105, "千葉市緑区"),
    (12, 106, "千葉市美浜区"),
    (12, 202, "銚子市"),
    (12, 203, "市川市"),
    (12, 204, "船橋市"),
    (12, 205, "館山市"),
    (12, 206, "木更津市"),
    (12, 207, "松戸市"),
    (12, 208, "野田市"),
    (12, 209, "茂原市"),
    (12, 210, "成田市"),
    (12, 211, "佐倉市"),
    (12, 212, "東金市"),
    (12, 213, "旭市"),
    (12, 214, "習志野市"),
    (12, 215, "柏市"),
    (12, 216, "勝浦市"),
    (12, 217, "市原市"),
    (12, 218, "流山市"),
    (12, 219, "八千代市"),
    (12, 220, "我孫子市"),
    (12, 221, "鴨川市"),
    (12, 222, "鎌ケ谷市"),
    (12, 223, "君津市"),
    (12, 224, "富津市"),
    (12, 225, "浦安市"),
    (12, 226, "四街道市"),
    (12, 227, "袖ケ浦市"),
    (12, 228, "八街市"),
    (12, 229, "印西市"),
    (12, 230, "白井市"),
    (12, 231, "富里市"),
    (12, 232, "南房総市"),
    (12, 233, "匝瑳市"),
    (12, 234, "香取市"),
    (12, 235, "山武市"),
    (12, 236, "いすみ市"),
    (12, 237, "大網白里市"),
    // 東京都 (13)
    (13, 101, "千代田区"),
    (13, 102, "中央区"),
    (13, 103, "港区"),
    (13, 104, "新宿区"),
    (13, 105, "文京区"),
    (13, 106, "台東区"),
    (13, 107, "墨田区"),
    (13, 108, "江東区"),
    (13, 109, "品川区"),
    (13, 110, "目黒区"),
    (13, 111, "大田区"),
    (13, 112, "世田谷区"),
    (13, 113, "渋谷区"),
    (13, 114, "中野区"),
    (13, 115, "杉並区"),
    (13, 116, "豊島区"),
    (13, 117, "北区"),
    (13, 118, "荒川区"),
    (13, 119, "板橋区"),
    (13, 120, "練馬区"),
    (13, 121, "足立区"),
    (13, 122, "葛飾区"),
    (13, 123, "江戸川区"),
    (13, 201, "八王子市"),
    (13, 202, "立川市"),
    (13, 203, "武蔵野市"),
    (13, 204, "三鷹市"),
    (13, 205, "青梅市"),
    (13, 206, "府中市"),
    (13, 207, "昭島市"),
    (13, 208, "調布市"),
    (13, 209, "町田市"),
    (13, 210, "小金井市"),
    (13, 211, "小平市"),
    (13, 212, "日野市"),
    (13, 213, "東村山市"),
    (13, 214, "国分寺市"),
    (13, 215, "国立市"),
    (13, 218, "福生市"),
    (13, 219, "狛江市"),
    (13, 220, "東大和市"),
    (13, 221, "清瀬市"),
    (13, 222, "東久留米市"),
    (13, 223, "武蔵村山市"),
    (13, 224, "多摩市"),
    (13, 225, "稲城市"),
    (13, 227, "羽村市"),
    (13, 228, "あきる野市"),
    (13, 229, "西東京市"),
    // 埼玉県 (11)
    (11, 100, "さいたま市"),
    (11, 101, "さいたま市西区"),
    (11, 102, "さいたま市北区"),
    (11, 103, "さいたま市大宮区"),
    (11, 104, "さいたま市見沼区"),
    (11, 105, "さいたま市中央区"),
    (11, 106, "さいたま市桜区"),
    (11, 107, "さいたま市浦和区"),
    (11, 108, "さいたま市南区"),
    (11, 109, "さいたま市緑区"),
    (11, 110, "さいたま市岩槻区"),
    // 神奈川県 (14)
    (14, 100, "横浜市"),
    (14, 101, "横浜市鶴見区"),
    (14, 102, "横浜市神奈川区"),
    (14, 103, "横浜市西区"),
    (14, 104, "横浜市中区"),
    (14, 105, "横浜市南区"),
    (14, 106, "横浜市保土ケ谷区"),
    (14, 107, "横浜市磯子区"),
    (14, 108, "横浜市金沢区"),
    (14, 109, "横浜市港北区"),
    (14, 110, "横浜市戸塚区"),
    (14, 111, "横浜市港南区"),
    (14, 112, "横浜市旭区"),
    (14, 113, "横浜市緑区"),
    (14, 114, "横浜市瀬谷区"),
    (14, 115, "横浜市栄区"),
    (14, 116, "横浜市泉区"),
    (14, 117, "横浜市青葉区"),
    (14, 118, "横浜市都筑区"),
];

pub fn prefecture_name(code: u32) -> Option<&'static str> {
    PREFECTURES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub fn city_name(pref_code: u32, city_code: u32) -> Option<&'static str> {
    CITIES
        .iter()
        .find(|(p, c, _)| *p == pref_code && *c == city_code)
        .map(|(_, _, name)| *name)
}

/// Reverse lookup: prefecture a municipality name belongs to. Used by the
/// address-text fallback when the address carries no prefecture.
pub fn prefecture_of_city(city: &str) -> Option<&'static str> {
    CITIES
        .iter()
        .find(|(_, _, name)| *name == city)
        .and_then(|(p, _, _)| prefecture_name(*p))
}

/// Prefecture names ordered longest first, so a longer name is never masked
/// by a shorter one when scanning free-text addresses.
pub fn prefectures_longest_first() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = PREFECTURES.iter().map(|(_, n)| *n).collect();
    names.sort_by_key(|n| std::cmp::Reverse(n.chars().count()));
    names
}

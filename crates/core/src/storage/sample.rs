use crate::models::itinerary::{Category, DayItinerary, ItineraryItem, Links};
use crate::models::money::Money;
use crate::models::trip::{Trip, DEFAULT_EXCHANGE_RATE};

fn stop(
    id: &str,
    time: &str,
    name: &str,
    category: Category,
    yen: f64,
    map: Option<&str>,
    memo: &str,
) -> ItineraryItem {
    ItineraryItem {
        id: id.to_string(),
        time: time.to_string(),
        name: name.to_string(),
        category,
        cost: Money::jpy(yen),
        links: Links {
            map: map.map(str::to_string),
            website: None,
            tel: None,
        },
        place_id_or_address: None,
        memo: Some(memo.to_string()).filter(|m| !m.is_empty()),
        images: Vec::new(),
    }
}

fn day(id: &str, date: &str, weekday: &str, city: &str, stay: &str, items: Vec<ItineraryItem>) -> DayItinerary {
    DayItinerary {
        id: id.to_string(),
        date: date.to_string(),
        day_of_week: Some(weekday.to_string()),
        city: Some(city.to_string()),
        accommodation: Some(stay.to_string()),
        budget_hint: None,
        cover_image: None,
        items,
    }
}

/// The built-in Kansai trip shown when nothing has been saved yet.
pub fn sample_trip() -> Trip {
    use Category::*;

    let mut day1 = day(
        "day1",
        "2024-12-03",
        "수요일",
        "교토",
        "20 Pieces",
        vec![
            stop("item1-1", "14:00", "간사이공항(KIX) 도착", Transportation, 0.0, Some("간사이국제공항"), "KE723 항공편으로 도착"),
            stop("item1-2", "16:30", "교토역 도착 (HARUKA 특급)", Transportation, 3600.0, Some("교토역"), "75분 소요, IC카드 구매"),
            stop("item1-3", "18:00", "니시키 시장 점심", Dining, 2500.0, Some("니시키시장"), "교토의 부엌, 다양한 길거리 음식"),
            stop("item1-4", "19:30", "금각사(킨카쿠지) 관람", Sightseeing, 600.0, Some("금각사"), "석양 시간대가 가장 아름다움"),
            stop("item1-5", "21:00", "기온 거리 산책", Sightseeing, 0.0, Some("기온거리"), "전통 건축물과 게이샤 문화 체험"),
            stop("item1-6", "22:30", "20 Pieces 체크인", Rest, 25000.0, Some("20 Pieces 호텔"), "부티크 호텔, 체크인 시간 확인 필요"),
        ],
    );
    day1.items[0].links.website = Some("https://www.kansai-airport.or.jp".to_string());
    day1.items[1].links.website = Some("https://www.jr-odekake.net".to_string());

    let day2 = day(
        "day2",
        "2024-12-04",
        "목요일",
        "교토",
        "아사노야 료칸",
        vec![
            stop("item2-1", "07:00", "호텔 조식", Dining, 3000.0, None, "일식 조식 세트"),
            stop("item2-2", "09:00", "아라시야마 대나무 숲", Sightseeing, 0.0, Some("아라시야마 대나무숲"), "오전 햇살이 가장 아름다운 시간"),
            stop("item2-3", "11:30", "텐류지 절 관람", Sightseeing, 600.0, Some("텐류지"), "세계문화유산, 정원 입장료 별도 500엔"),
            stop("item2-4", "13:00", "아라시야마 점심", Dining, 4500.0, Some("아라시야마 맛집거리"), "토후 요리 전문점"),
            stop("item2-5", "15:00", "유무라온천 이동", Transportation, 1200.0, Some("유무라온천역"), "한큐선 + 신테츠선 환승, 2시간 소요"),
            stop("item2-6", "17:30", "아사노야 료칸 체크인", Rest, 45000.0, Some("아사노야 료칸"), "전통 료칸, 온천 포함"),
        ],
    );

    let day3 = day(
        "day3",
        "2024-12-05",
        "금요일",
        "아리마",
        "Candeo Hotels The Tower",
        vec![
            stop("item3-1", "08:00", "료칸 조식", Dining, 0.0, None, "료칸 포함 조식"),
            stop("item3-2", "10:00", "긴센 온천 입욕", Rest, 3000.0, Some("긴센온천"), "철분이 많아 갈색빛, 아리마 대표 온천"),
            stop("item3-3", "12:00", "아리마 온천가 산책", Sightseeing, 0.0, Some("아리마온천가"), "온천 마을 분위기 만끽"),
            stop("item3-4", "14:00", "오사카 이동", Transportation, 800.0, Some("오사카역"), "신테츠선, 1시간 소요"),
            stop("item3-5", "16:00", "우메다 주변 쇼핑", Sightseeing, 15000.0, Some("우메다"), "한신백화점, 다이마루 등"),
            stop("item3-6", "19:00", "Candeo Hotels 체크인", Rest, 18000.0, Some("Candeo Hotels The Tower"), "오사카 시내 중심가 위치"),
            stop("item3-7", "20:30", "도톤보리 저녁", Dining, 8000.0, Some("도톤보리"), "오사카 대표 먹거리 거리"),
        ],
    );

    let day4 = day(
        "day4",
        "2024-12-06",
        "토요일",
        "오사카",
        "없음 (출국일)",
        vec![
            stop("item4-1", "08:00", "호텔 조식", Dining, 2500.0, None, ""),
            stop("item4-2", "09:30", "오사카성 관람", Sightseeing, 600.0, Some("오사카성"), "천수각 전망대"),
            stop("item4-3", "12:00", "구로몬 시장 점심", Dining, 3000.0, Some("구로몬시장"), "신선한 해산물"),
            stop("item4-4", "14:00", "간사이공항 이동 (HARUKA)", Transportation, 2900.0, Some("간사이국제공항"), "출국 2시간 전 도착 목표"),
            stop("item4-5", "17:00", "KE724 출국", Transportation, 0.0, None, "인천공항 도착 19:30 (현지시간)"),
        ],
    );

    Trip {
        id: "kansai-trip-2024".to_string(),
        title: "간사이 3박4일 여행".to_string(),
        start_date: "2024-12-03".to_string(),
        end_date: "2024-12-06".to_string(),
        days: vec![day1, day2, day3, day4],
        exchange_rate: DEFAULT_EXCHANGE_RATE,
        participants: 2,
        total_budget: None,
        budget_currency: None,
    }
}

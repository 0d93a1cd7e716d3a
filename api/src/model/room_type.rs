use chrono::NaiveDate;
use garde::Validate;
use kernel::model::hotel::{RoomAvailability, RoomTypeWithHotel};
use kernel::model::id::{HotelId, RoomTypeId};
use serde::{Deserialize, Serialize};

// 空室検索の対象期間。チェックイン日とチェックアウト日で指定する
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub room_type_id: RoomTypeId,
    pub total_rooms: i32,
    pub available_rooms: i64,
}

impl From<RoomAvailability> for AvailabilityResponse {
    fn from(value: RoomAvailability) -> Self {
        Self {
            room_type_id: value.room_type_id,
            total_rooms: value.total_rooms,
            available_rooms: value.remaining(),
        }
    }
}

// オーナー向けダッシュボードの 1 行
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerAvailabilityItem {
    pub room_type_id: RoomTypeId,
    pub room_type_name: String,
    pub total_rooms: i32,
    pub available_rooms: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerAvailabilityResponse {
    pub items: Vec<OwnerAvailabilityItem>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomTypeRoomsRequest {
    #[garde(range(min = 0))]
    pub total_rooms: i32,
    // 期間を指定しない場合は全期間が対象
    #[garde(skip)]
    pub start_date: Option<NaiveDate>,
    #[garde(skip)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeResponse {
    pub room_type_id: RoomTypeId,
    pub room_type_name: String,
    pub total_rooms: i32,
    pub price_per_night: i32,
    pub hotel: HotelResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelResponse {
    pub hotel_id: HotelId,
    pub hotel_name: String,
    pub address: String,
}

impl From<RoomTypeWithHotel> for RoomTypeResponse {
    fn from(value: RoomTypeWithHotel) -> Self {
        let RoomTypeWithHotel { room_type, hotel } = value;
        Self {
            room_type_id: room_type.room_type_id,
            room_type_name: room_type.room_type_name,
            total_rooms: room_type.total_rooms,
            price_per_night: room_type.price_per_night,
            hotel: HotelResponse {
                hotel_id: hotel.hotel_id,
                hotel_name: hotel.hotel_name,
                address: hotel.address,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_rejects_negative_total_rooms() {
        let req: UpdateRoomTypeRoomsRequest =
            serde_json::from_str(r#"{"totalRooms": -1}"#).unwrap();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn test_update_request_accepts_zero_rooms() {
        let req: UpdateRoomTypeRoomsRequest =
            serde_json::from_str(r#"{"totalRooms": 0}"#).unwrap();
        assert!(req.validate(&()).is_ok());
    }
}

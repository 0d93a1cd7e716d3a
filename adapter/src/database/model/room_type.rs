use kernel::model::hotel::{Hotel, RoomAvailability, RoomType, RoomTypeWithHotel};
use kernel::model::id::{HotelId, RoomTypeId, UserId};

#[derive(sqlx::FromRow)]
pub struct RoomTypeRow {
    pub room_type_id: RoomTypeId,
    pub hotel_id: HotelId,
    pub room_type_name: String,
    pub total_rooms: i32,
    pub price_per_night: i32,
}

impl From<RoomTypeRow> for RoomType {
    fn from(value: RoomTypeRow) -> Self {
        let RoomTypeRow {
            room_type_id,
            hotel_id,
            room_type_name,
            total_rooms,
            price_per_night,
        } = value;
        RoomType {
            room_type_id,
            hotel_id,
            room_type_name,
            total_rooms,
            price_per_night,
        }
    }
}

// 客室タイプと所属ホテルを JOIN で一緒に取得する際に使う型
#[derive(sqlx::FromRow)]
pub struct RoomTypeWithHotelRow {
    pub room_type_id: RoomTypeId,
    pub hotel_id: HotelId,
    pub room_type_name: String,
    pub total_rooms: i32,
    pub price_per_night: i32,
    pub owner_id: UserId,
    pub hotel_name: String,
    pub address: String,
}

impl From<RoomTypeWithHotelRow> for RoomTypeWithHotel {
    fn from(value: RoomTypeWithHotelRow) -> Self {
        let RoomTypeWithHotelRow {
            room_type_id,
            hotel_id,
            room_type_name,
            total_rooms,
            price_per_night,
            owner_id,
            hotel_name,
            address,
        } = value;
        RoomTypeWithHotel {
            room_type: RoomType {
                room_type_id,
                hotel_id,
                room_type_name,
                total_rooms,
                price_per_night,
            },
            hotel: Hotel {
                hotel_id,
                owner_id,
                hotel_name,
                address,
            },
        }
    }
}

// 在庫状況の読み取り結果。overlap_count は期間に重なる CONFIRMED 予約数
#[derive(sqlx::FromRow)]
pub struct RoomAvailabilityRow {
    pub room_type_id: RoomTypeId,
    pub total_rooms: i32,
    pub overlap_count: i64,
}

impl From<RoomAvailabilityRow> for RoomAvailability {
    fn from(value: RoomAvailabilityRow) -> Self {
        let RoomAvailabilityRow {
            room_type_id,
            total_rooms,
            overlap_count,
        } = value;
        RoomAvailability {
            room_type_id,
            total_rooms,
            overlap_count,
        }
    }
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `graduates` table and its columns.
#[derive(DeriveIden)]
enum Graduates {
    Table,
    Id,
    Surname,
    FirstName,
    MiddleName,
    Email,
    Phone,
    PermanentAddress,
    Sex,
    CivilStatus,
    YearGraduated,
    CollegeCampus,
    Program,
    Major,
    DepartmentId,
    Course,
    AdvancedStudy,
    ProfessionalExam,
    Trainings,
    EverEmployed,
    Employment,
    Unemployment,
    ProfilePicture,
    ActivityImages,
    Status,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare the parent table identifiers for the foreign-key reference.
#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Graduates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Graduates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Graduates::Surname).string().not_null())
                    .col(ColumnDef::new(Graduates::FirstName).string().not_null())
                    .col(ColumnDef::new(Graduates::MiddleName).string())
                    // Nullable for records that predate the email requirement;
                    // new submissions always carry one.
                    .col(ColumnDef::new(Graduates::Email).string().unique_key())
                    .col(ColumnDef::new(Graduates::Phone).string().not_null())
                    .col(
                        ColumnDef::new(Graduates::PermanentAddress)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Graduates::Sex).string().not_null())
                    .col(ColumnDef::new(Graduates::CivilStatus).string().not_null())
                    .col(
                        ColumnDef::new(Graduates::YearGraduated)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Graduates::CollegeCampus)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Graduates::Program).string().not_null())
                    .col(ColumnDef::new(Graduates::Major).string())
                    .col(ColumnDef::new(Graduates::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(Graduates::Course).string().not_null())
                    .col(ColumnDef::new(Graduates::AdvancedStudy).json_binary())
                    .col(ColumnDef::new(Graduates::ProfessionalExam).json_binary())
                    .col(
                        ColumnDef::new(Graduates::Trainings)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Graduates::EverEmployed).string().not_null())
                    .col(ColumnDef::new(Graduates::Employment).json_binary())
                    .col(ColumnDef::new(Graduates::Unemployment).json_binary())
                    .col(ColumnDef::new(Graduates::ProfilePicture).string())
                    .col(
                        ColumnDef::new(Graduates::ActivityImages)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Graduates::Status).string().not_null())
                    .col(
                        ColumnDef::new(Graduates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Graduates::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_graduates_department_id")
                            .from(Graduates::Table, Graduates::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The admin back-office filters by status constantly.
        manager
            .create_index(
                Index::create()
                    .name("idx_graduates_status")
                    .table(Graduates::Table)
                    .col(Graduates::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_graduates_status")
                    .table(Graduates::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Graduates::Table).to_owned())
            .await
    }
}
